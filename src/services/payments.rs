use md5::{Digest, Md5};

/// Order identifiers sent to the payment provider: `MZV-<booking_id>`.
pub const ORDER_ID_PREFIX: &str = "MZV";

pub fn order_id_for(booking_id: i64) -> String {
    format!("{ORDER_ID_PREFIX}-{booking_id}")
}

fn md5_upper(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize()).to_uppercase()
}

/// Checkout form hash per the provider's two-stage scheme: the merchant
/// secret is hashed and upper-cased first, then concatenated after
/// merchant_id, order_id, amount and currency for the outer digest.
/// `amount` must be the exact two-decimal string placed in the form.
pub fn checkout_hash(
    merchant_id: &str,
    order_id: &str,
    amount: &str,
    currency: &str,
    merchant_secret: &str,
) -> String {
    let secret_hash = md5_upper(merchant_secret);
    md5_upper(&format!("{merchant_id}{order_id}{amount}{currency}{secret_hash}"))
}

/// Webhook signature: same two-stage scheme with payment_id and status_code
/// spliced into the concatenation.
pub fn notify_signature(
    merchant_id: &str,
    order_id: &str,
    payment_id: &str,
    amount: &str,
    currency: &str,
    status_code: &str,
    merchant_secret: &str,
) -> String {
    let secret_hash = md5_upper(merchant_secret);
    md5_upper(&format!(
        "{merchant_id}{order_id}{payment_id}{amount}{currency}{status_code}{secret_hash}"
    ))
}

/// The provider hashes over the exact amount string, so the same formatting
/// must be used in the form and in the hash input.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Split a guest's full name into the provider's first/last fields: first
/// token is the first name, the rest joined is the last name. The provider
/// rejects an empty last name, so it falls back to a single space.
pub fn split_guest_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or("").to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    let last = if rest.is_empty() { " ".to_string() } else { rest };
    (first, last)
}

pub fn html_escape(s: &str) -> String {
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

/// Hidden-field payload for the hosted checkout form.
pub struct CheckoutForm {
    pub action_url: String,
    pub fields: Vec<(&'static str, String)>,
}

/// Minimal page that posts the checkout form to the provider as soon as it
/// loads, with a manual submit button in case scripting is disabled.
pub fn render_checkout_page(form: &CheckoutForm) -> String {
    let inputs = form
        .fields
        .iter()
        .map(|(name, value)| {
            format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                name,
                html_escape(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Redirecting to payment</title>
  </head>
  <body>
    <p>Redirecting you to our secure payment page&hellip;</p>
    <form id="checkout" method="post" action="{action}">
      {inputs}
      <button type="submit">Continue to payment</button>
    </form>
    <script>document.getElementById("checkout").submit();</script>
  </body>
</html>
"#,
        action = html_escape(&form.action_url),
        inputs = inputs
    )
}

pub fn render_info_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
  </head>
  <body>
    <h1>{title}</h1>
    <p>{body}</p>
  </body>
</html>
"#,
        title = html_escape(title),
        body = html_escape(body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Hash scheme ──

    #[test]
    fn test_checkout_hash_fixed_vector() {
        // Pinned regression vector for the two-stage upper-cased MD5 scheme.
        let hash = checkout_hash("M1", "MZV-7", "5000.00", "LKR", "S1");
        assert_eq!(hash, "64628CFF30D7C15632C8F4E5C8564DD1");
    }

    #[test]
    fn test_notify_signature_fixed_vector() {
        let sig = notify_signature("M1", "MZV-7", "320025123", "5000.00", "LKR", "2", "S1");
        assert_eq!(sig, "2AAA39603DF3014605A4E547421301A0");
    }

    #[test]
    fn test_checkout_hash_is_deterministic() {
        let a = checkout_hash("M1", "MZV-7", "5000.00", "LKR", "S1");
        let b = checkout_hash("M1", "MZV-7", "5000.00", "LKR", "S1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_checkout_hash_sensitive_to_each_input() {
        let base = checkout_hash("M1", "MZV-7", "5000.00", "LKR", "S1");
        assert_ne!(base, checkout_hash("M2", "MZV-7", "5000.00", "LKR", "S1"));
        assert_ne!(base, checkout_hash("M1", "MZV-8", "5000.00", "LKR", "S1"));
        assert_ne!(base, checkout_hash("M1", "MZV-7", "5000.01", "LKR", "S1"));
        assert_ne!(base, checkout_hash("M1", "MZV-7", "5000.00", "USD", "S1"));
        assert_ne!(base, checkout_hash("M1", "MZV-7", "5000.00", "LKR", "S2"));
    }

    #[test]
    fn test_notify_signature_sensitive_to_status_code() {
        let ok = notify_signature("M1", "MZV-7", "320025123", "5000.00", "LKR", "2", "S1");
        let failed = notify_signature("M1", "MZV-7", "320025123", "5000.00", "LKR", "0", "S1");
        assert_ne!(ok, failed);
        assert_eq!(failed, "892FBBB6CD47FE32E897A9A868728206");
    }

    #[test]
    fn test_hash_output_is_upper_hex() {
        let hash = checkout_hash("M1", "MZV-7", "5000.00", "LKR", "S1");
        assert_eq!(hash.len(), 32);
        assert!(hash.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    // ── Form helpers ──

    #[test]
    fn test_order_id_format() {
        assert_eq!(order_id_for(7), "MZV-7");
        assert_eq!(order_id_for(12345), "MZV-12345");
    }

    #[test]
    fn test_format_amount_two_decimals() {
        assert_eq!(format_amount(5000.0), "5000.00");
        assert_eq!(format_amount(5000.5), "5000.50");
        assert_eq!(format_amount(12345.678), "12345.68");
    }

    #[test]
    fn test_split_guest_name() {
        assert_eq!(
            split_guest_name("Amara Perera"),
            ("Amara".to_string(), "Perera".to_string())
        );
        assert_eq!(
            split_guest_name("Jean Claude van Damme"),
            ("Jean".to_string(), "Claude van Damme".to_string())
        );
        // Single-token names fall back to a single space for the last name.
        assert_eq!(split_guest_name("Madonna"), ("Madonna".to_string(), " ".to_string()));
        assert_eq!(split_guest_name(""), ("".to_string(), " ".to_string()));
        assert_eq!(split_guest_name("  Amara   Perera  "), ("Amara".to_string(), "Perera".to_string()));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"O'Brien & Sons"</b>"#),
            "&lt;b&gt;&quot;O&#39;Brien &amp; Sons&quot;&lt;/b&gt;"
        );
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_render_checkout_page_escapes_values() {
        let form = CheckoutForm {
            action_url: "https://sandbox.payhere.lk/pay/checkout".to_string(),
            fields: vec![
                ("order_id", "MZV-7".to_string()),
                ("first_name", "O'Brien <script>".to_string()),
            ],
        };
        let page = render_checkout_page(&form);
        assert!(page.contains(r#"action="https://sandbox.payhere.lk/pay/checkout""#));
        assert!(page.contains(r#"name="order_id" value="MZV-7""#));
        assert!(page.contains("O&#39;Brien &lt;script&gt;"));
        assert!(!page.contains("O'Brien <script>"));
        assert!(page.contains(r#"document.getElementById("checkout").submit();"#));
        assert!(page.contains("Continue to payment"));
    }
}
