//! User-facing message catalog.
//!
//! Replies are sent with HTML formatting, so anything interpolated from an
//! API response or from user input goes through [`html_escape`] first. The
//! literals here are load-bearing: [`HAY_PROMPT`] doubles as the match
//! anchor for the reply-capture path, so it must stay byte-identical to
//! what the `/hay` handler sends.

/// Prompt sent by `/hay` as a force-reply message. Reply-capture matches
/// the quoted text against this exact string.
pub const HAY_PROMPT: &str = "Masukkan kode di sini";

/// Fallback for any text that is not a known command.
pub const UNKNOWN_COMMAND: &str =
    "Perintah tidak dikenali. Silakan ketik /start untuk memulai.";

/// Shown when the directory returns nothing usable for `/start`.
pub const NO_APPS: &str = "Tidak ada aplikasi Netlify yang ditemukan atau terjadi kesalahan.";

/// Header above the site-selection keyboard.
pub const CHOOSE_APP: &str = "Silakan pilih aplikasi untuk mendapatkan kode akses:";

/// Shown when a pressed site id no longer resolves, or the site has no
/// credential entry.
pub const APP_NOT_FOUND: &str = "Maaf, tidak dapat menemukan detail aplikasi.";

/// Shown when the gateway has no unused code left.
pub const NO_CODE: &str = "Tidak ada kode akses yang tersedia saat ini.";

pub const MARK_USED_FAILED: &str = "Gagal menandai kode. Coba lagi nanti.";

/// Label on the code-issuance button.
pub const GET_CODE_BUTTON: &str = "Ambil Kode Akses";

/// Label on the mark-consumed button.
pub const MARK_USED_BUTTON: &str = "Tandai Sudah Dipakai";

/// Greeting template for the reply-capture path.
pub fn greeting(input: &str) -> String {
    format!("Halo! Kode yang Anda masukkan: {}", html_escape(input))
}

/// Configuration-error reply naming every unresolved secret variable.
pub fn missing_secrets(names: &[String]) -> String {
    format!(
        "Konfigurasi tidak lengkap. Variabel berikut belum diatur: {}",
        names.join(", ")
    )
}

/// Selection reply for rule "you picked <name>", admin URL included when
/// the directory knows one.
pub fn app_selected(name: &str, admin_url: Option<&str>) -> String {
    match admin_url {
        Some(url) => format!(
            "Anda memilih: <b>{}</b>.\nAdmin: {}",
            html_escape(name),
            html_escape(url)
        ),
        None => format!("Anda memilih: <b>{}</b>.", html_escape(name)),
    }
}

/// Confirmation that a specific code was marked consumed.
pub fn mark_used_ok(code: &str) -> String {
    format!(
        "Kode <code>{}</code> berhasil ditandai sudah dipakai.",
        html_escape(code)
    )
}

/// Reply carrying a freshly issued access code.
pub fn code_issued(name: &str, code: &str) -> String {
    format!(
        "Kode akses untuk <b>{}</b>:\n\n<code>{}</code>",
        html_escape(name),
        html_escape(code)
    )
}

/// Minimal HTML escaping for text interpolated into HTML-formatted replies.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape_neutralizes_markup() {
        assert_eq!(html_escape("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_greeting_embeds_input() {
        let msg = greeting("ABC123");
        assert!(msg.contains("ABC123"));
        assert!(msg.starts_with("Halo!"));
    }

    #[test]
    fn test_missing_secrets_names_every_variable() {
        let msg = missing_secrets(&["A_URL".to_string(), "A_KEY".to_string()]);
        assert!(msg.contains("A_URL"));
        assert!(msg.contains("A_KEY"));
    }

    #[test]
    fn test_mark_used_ok_contains_the_code() {
        assert!(mark_used_ok("ABC123").contains("ABC123"));
    }

    #[test]
    fn test_app_selected_with_and_without_admin_url() {
        let with = app_selected("site-a", Some("https://app.netlify.com/sites/site-a"));
        assert!(with.contains("site-a"));
        assert!(with.contains("Admin:"));

        let without = app_selected("site-a", None);
        assert!(!without.contains("Admin:"));
    }
}
