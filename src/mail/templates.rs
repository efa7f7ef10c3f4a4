//! Confirmation email bodies.

use super::Email;

/// Escape text for inclusion in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn wrap(heading: &str, paragraphs: &[String]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
    format!("<div style=\"font-family:sans-serif;line-height:1.5\"><h2>{heading}</h2>{body}</div>")
}

/// Confirmation for a public registration.
#[must_use]
pub fn registration_confirmation(from: &str, to: &str, name: &str, reference: &str) -> Email {
    Email {
        to: to.to_string(),
        from: from.to_string(),
        subject: "Your registration is confirmed".to_string(),
        html: wrap(
            "Registration confirmed",
            &[
                format!("Hi {},", escape_html(name)),
                "Thank you for registering for the entrepreneurship summit. Your spot is \
                 confirmed and we will share the schedule and venue details closer to the event."
                    .to_string(),
                format!("Your registration reference is <strong>{}</strong>.", escape_html(reference)),
            ],
        ),
    }
}

/// Confirmation for a participation application.
#[must_use]
pub fn participation_confirmation(
    from: &str,
    to: &str,
    name: &str,
    role: &str,
    reference: &str,
) -> Email {
    Email {
        to: to.to_string(),
        from: from.to_string(),
        subject: format!("We received your {role} application"),
        html: wrap(
            "Application received",
            &[
                format!("Hi {},", escape_html(name)),
                format!(
                    "Thank you for applying to join the summit as a {}. Our team will review \
                     your application and get back to you soon.",
                    escape_html(role)
                ),
                format!("Your application reference is <strong>{}</strong>.", escape_html(reference)),
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>Tom & \"Jerry\"</b>"), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_registration_confirmation_escapes_name() {
        let email = registration_confirmation("events@x.org", "a@b.com", "<script>", "REG-1");
        assert_eq!(email.to, "a@b.com");
        assert!(email.html.contains("&lt;script&gt;"));
        assert!(email.html.contains("REG-1"));
    }

    #[test]
    fn test_participation_subject_names_role() {
        let email = participation_confirmation("events@x.org", "a@b.com", "Asha", "mentor", "PRT-1");
        assert_eq!(email.subject, "We received your mentor application");
    }
}
