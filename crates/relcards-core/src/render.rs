//! HTML card for one application.

use crate::apps::AppDescriptor;
use std::fmt::Write;

/// Resolved per-card values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardData {
    pub version: Option<String>,
    pub download_url: String,
    /// Digest, or an error description when hashing failed.
    pub checksum: Option<String>,
}

/// Upper-cased first letters of the first two words of `name`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render one card. Pure: same inputs, same bytes.
pub fn render_card(app: &AppDescriptor, data: &CardData, download_label: &str) -> String {
    let mut html = String::new();
    // Writing to a String cannot fail.
    let _ = write_card(&mut html, app, data, download_label);
    html
}

fn write_card(
    out: &mut String,
    app: &AppDescriptor,
    data: &CardData,
    download_label: &str,
) -> std::fmt::Result {
    writeln!(out, "<div class=\"card\">")?;
    writeln!(out, "  <div class=\"icon\">{}</div>", escape_html(&initials(&app.name)))?;
    writeln!(out, "  <div class=\"card-body\">")?;
    writeln!(out, "    <div class=\"card-title\">{}</div>", escape_html(&app.name))?;
    writeln!(out, "    <div class=\"card-desc\">{}</div>", escape_html(&app.description))?;
    writeln!(out, "    <div class=\"card-meta\">")?;
    writeln!(out, "      <div class=\"tag\">{}</div>", escape_html(&app.platform))?;
    if let Some(version) = &data.version {
        writeln!(out, "      <div class=\"tag\">{}</div>", escape_html(version))?;
    }
    writeln!(out, "      <div style=\"flex:1\"></div>")?;
    writeln!(
        out,
        "      <a class=\"btn\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
        escape_html(&data.download_url),
        escape_html(download_label)
    )?;
    writeln!(out, "    </div>")?;
    if let Some(checksum) = &data.checksum {
        writeln!(
            out,
            "    <div class=\"card-meta\"><small>SHA-256: <code>{}</code></small></div>",
            escape_html(checksum)
        )?;
    }
    writeln!(out, "  </div>")?;
    writeln!(out, "</div>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(name: &str) -> AppDescriptor {
        AppDescriptor {
            name: name.to_string(),
            description: "Editor".to_string(),
            platform: "Linux".to_string(),
            ..AppDescriptor::default()
        }
    }

    #[test]
    fn initials_first_two_words() {
        assert_eq!(initials("visual studio code"), "VS");
        assert_eq!(initials("Firefox"), "F");
        assert_eq!(initials("  gimp   image editor "), "GI");
        assert_eq!(initials(""), "");
        assert_eq!(initials("écran noir"), "ÉN");
    }

    #[test]
    fn escape_html_special_chars() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn render_card_exact_layout() {
        let data = CardData {
            version: None,
            download_url: "https://example.com/dl".to_string(),
            checksum: None,
        };
        let html = render_card(&app("Gnome Boxes"), &data, "Download oficial");
        let expected = "\
<div class=\"card\">
  <div class=\"icon\">GB</div>
  <div class=\"card-body\">
    <div class=\"card-title\">Gnome Boxes</div>
    <div class=\"card-desc\">Editor</div>
    <div class=\"card-meta\">
      <div class=\"tag\">Linux</div>
      <div style=\"flex:1\"></div>
      <a class=\"btn\" href=\"https://example.com/dl\" target=\"_blank\" rel=\"noopener\">Download oficial</a>
    </div>
  </div>
</div>
";
        assert_eq!(html, expected);
    }

    #[test]
    fn render_card_with_version_and_checksum() {
        let data = CardData {
            version: Some("v1.2".to_string()),
            download_url: "https://example.com/dl".to_string(),
            checksum: Some("abc123".to_string()),
        };
        let html = render_card(&app("Tool"), &data, "Get");
        assert!(html.contains("<div class=\"tag\">v1.2</div>"));
        assert!(html.contains("<small>SHA-256: <code>abc123</code></small>"));
        assert!(html.contains(">Get</a>"));
    }

    #[test]
    fn render_card_is_deterministic() {
        let data = CardData {
            download_url: "#".to_string(),
            ..CardData::default()
        };
        let a = render_card(&app("Same"), &data, "x");
        let b = render_card(&app("Same"), &data, "x");
        assert_eq!(a, b);
    }
}
