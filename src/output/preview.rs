//! Preview page listing every icon next to its rendered symbol.

use crate::utils::html::escape;

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta http-equiv="X-UA-Compatible" content="IE=edge">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Icon Test</title>
</head>
<body>
<table>
  <thead>
    <tr>
      <th>Name</th>
      <th colspan="2">Icon</th>
    </tr>
  </thead>
  <tbody>
"#;

const ICON_STYLE: &str = "height: 32px; width: auto;";

/// Build the preview document for `ids`, embedding `sprite` once after the
/// table so every `<use>` resolves within the page.
pub fn generate_preview(ids: &[String], sprite: &str) -> String {
    let mut html = String::with_capacity(HEAD.len() + sprite.len() + ids.len() * 320);
    html.push_str(HEAD);

    for id in ids {
        let id = escape(id);
        html.push_str("    <tr>\n      <td>");
        html.push_str(&id);
        html.push_str("</td>\n");
        push_icon_cell(&mut html, &id, ICON_STYLE);
        push_icon_cell(&mut html, &id, &format!("{ICON_STYLE} fill: red;"));
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>\n");
    html.push_str(sprite);
    html.push_str("\n</body>\n</html>\n");
    html
}

fn push_icon_cell(html: &mut String, id: &str, style: &str) {
    html.push_str(r#"      <td><svg style=""#);
    html.push_str(style);
    html.push_str(r##"" class="icon" viewBox="0 0 32 32"><use xlink:href="#"##);
    html.push_str(id);
    html.push_str("\" /></svg></td>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_preview_is_deterministic() {
        let ids = ids(&["home", "star"]);
        assert_eq!(
            generate_preview(&ids, "<svg></svg>"),
            generate_preview(&ids, "<svg></svg>")
        );
    }

    #[test]
    fn test_two_references_per_id() {
        let ids = ids(&["home", "star", "arrow"]);
        let html = generate_preview(&ids, "<svg/>");

        assert_eq!(html.matches("<use xlink:href=").count(), 6);
        for id in &ids {
            let reference = format!(r##"<use xlink:href="#{id}" />"##);
            assert_eq!(html.matches(&reference).count(), 2);
        }
        assert_eq!(html.matches("fill: red;").count(), 3);
    }

    #[test]
    fn test_rows_follow_input_order() {
        let html = generate_preview(&ids(&["zeta", "alpha"]), "");
        let zeta = html.find("<td>zeta</td>").unwrap();
        let alpha = html.find("<td>alpha</td>").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_sprite_after_table() {
        let sprite = r#"<svg style="display: none;"><symbol id="home"></symbol></svg>"#;
        let html = generate_preview(&ids(&["home"]), sprite);
        let table_end = html.find("</table>").unwrap();
        assert_eq!(html.matches(sprite).count(), 1);
        assert!(html.find(sprite).unwrap() > table_end);
        assert!(html.contains("<title>Icon Test</title>"));
        assert!(html.contains(r#"<th colspan="2">Icon</th>"#));
    }

    #[test]
    fn test_id_text_is_escaped() {
        let html = generate_preview(&ids(&["a<b"]), "");
        assert!(html.contains("<td>a&lt;b</td>"));
        assert!(!html.contains("a<b"));
    }

    #[test]
    fn test_empty_ids() {
        let html = generate_preview(&[], "<svg/>");
        assert!(!html.contains("<use"));
        assert!(html.ends_with("<svg/>\n</body>\n</html>\n"));
    }
}
