//! The single HTML page: upload form, preview, notices and report panels.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::report::{render_sections, ReportSection};

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; display: flex; color: #262730; }
aside { width: 260px; min-height: 100vh; background: #f0f2f6; padding: 24px; box-sizing: border-box; }
main { max-width: 730px; margin: 0 auto; padding: 32px 24px; flex: 1; }
.report-title { font-size: 30px; font-weight: 600; color: #2c3e50; margin-bottom: 10px; }
.section-header { font-size: 20px; font-weight: 500; margin-top: 25px; color: #16a085; }
.notice { padding: 12px 16px; border-radius: 6px; margin: 16px 0; }
.notice.info { background: #e8f0fe; color: #174ea6; }
.notice.error { background: #fdecea; color: #8a1c1c; }
.preview img { max-width: 100%; border-radius: 4px; }
.preview figcaption { font-size: 13px; color: #6b6b6b; text-align: center; }
details.report-section { border: 1px solid #e6e6e6; border-radius: 6px; margin: 8px 0; padding: 8px 12px; }
details.report-section summary { cursor: pointer; font-weight: 500; }
#spinner { display: none; margin: 12px 0; }
"#;

const SCRIPT: &str = r#"
document.getElementById('image').addEventListener('change', function (e) {
  var file = e.target.files[0];
  var fig = document.getElementById('local-preview');
  if (!file) { fig.hidden = true; return; }
  fig.querySelector('img').src = URL.createObjectURL(file);
  fig.hidden = false;
});
document.getElementById('analyze-form').addEventListener('submit', function () {
  document.getElementById('spinner').style.display = 'block';
  document.getElementById('analyze').disabled = true;
});
"#;

pub const INFO_NOTICE: &str = "Please upload a medical image to begin diagnosis.";

/// Banner shown above the report area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// The uploaded image echoed back for display.
#[derive(Debug, Clone)]
pub struct Preview {
    pub data_url: String,
    pub caption: String,
}

#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub model: String,
    pub notes: String,
    pub preview: Option<Preview>,
    pub notice: Option<Notice>,
    pub sections: Option<Vec<ReportSection>>,
}

impl PageView {
    /// The page before anything was uploaded.
    pub fn landing(model: &str) -> Self {
        Self {
            model: model.to_string(),
            notice: Some(Notice::Info(INFO_NOTICE.to_string())),
            ..Self::default()
        }
    }

    pub fn render(&self) -> String {
        let mut body = String::new();

        if let Some(preview) = &self.preview {
            body.push_str(&format!(
                "<figure class=\"preview\"><img src=\"{}\" alt=\"Uploaded Image\"><figcaption>{}</figcaption></figure>\n",
                encode_double_quoted_attribute(&preview.data_url),
                encode_text(&preview.caption),
            ));
        }

        match &self.notice {
            Some(Notice::Info(message)) => body.push_str(&format!(
                "<div class=\"notice info\">{}</div>\n",
                encode_text(message)
            )),
            Some(Notice::Error(message)) => body.push_str(&format!(
                "<div class=\"notice error\" role=\"alert\">An error occurred: {}</div>\n",
                encode_text(message)
            )),
            None => {}
        }

        if let Some(sections) = &self.sections {
            body.push_str("<div class=\"section-header\">Diagnostic Report</div>\n");
            if sections.is_empty() {
                body.push_str("<p>The model response contained no report sections.</p>\n");
            } else {
                body.push_str(&render_sections(sections));
            }
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Medical Imaging Assistant</title>
<style>{style}</style>
</head>
<body>
<aside>
<h2>&#129658; AI Diagnostic Assistant</h2>
<p>Upload a medical image (X-ray, MRI, etc.) for AI-based diagnostic analysis using {model}.</p>
</aside>
<main>
<div class="report-title">Medical Image Diagnostic Report</div>
<form id="analyze-form" method="post" action="/analyze" enctype="multipart/form-data">
<label for="image">Upload a medical image</label><br>
<input type="file" id="image" name="image" accept=".jpg,.jpeg,.png,image/jpeg,image/png" required>
<figure id="local-preview" class="preview" hidden><img alt="Selected Image"></figure>
<p><label for="notes">Patient information (optional)</label><br>
<textarea id="notes" name="notes" rows="3" cols="60">{notes}</textarea></p>
<button type="submit" id="analyze">&#129504; Analyze Image</button>
<div id="spinner">Analyzing image. Please wait...</div>
</form>
{body}</main>
<script>{script}</script>
</body>
</html>
"#,
            style = STYLE,
            model = encode_text(&self.model),
            notes = encode_text(&self.notes),
            body = body,
            script = SCRIPT,
        )
    }
}
