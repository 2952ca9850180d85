use std::fmt::Write;

use tally_core::VoteCounter;

fn escape_html(s: &str) -> String {
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

/// Standings page. Rows keep the store's order; each carries a
/// `logo-<name>` class for the stylesheet.
pub(super) fn render(standings: &[VoteCounter]) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Vote</title></head>\n<body>\n\
         <div class=\"status healthy\">Database connected</div>\n<ul class=\"companies\">\n",
    );
    for c in standings {
        let name = escape_html(c.entity.as_str());
        let _ = writeln!(
            out,
            "<li class=\"company logo-{name}\" data-company=\"{name}\">\
             <span class=\"name\">{name}</span> <span class=\"votes\">{}</span></li>",
            c.count
        );
    }
    out.push_str("</ul>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::Entity;

    #[test]
    fn rows_follow_given_order() {
        let rows = vec![
            VoteCounter::new(Entity::parse("b").unwrap(), 3),
            VoteCounter::new(Entity::parse("a").unwrap(), 1),
        ];
        let html = render(&rows);
        let b = html.find("data-company=\"b\"").unwrap();
        let a = html.find("data-company=\"a\"").unwrap();
        assert!(b < a);
        assert!(html.contains("logo-b"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<a href='x'>&"), "&lt;a href=&#39;x&#39;&gt;&amp;");
    }
}
