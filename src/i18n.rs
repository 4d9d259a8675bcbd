//! UI localization
//!
//! Two static string tables, selected by language tag. Switching language
//! only swaps the table; it never touches generation settings.

use serde::Deserialize;
use std::fmt::Write;

use crate::error::QrError;
use crate::state::settings::EcLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    /// BCP 47 tag
    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// The other supported language
    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Arabic,
            Language::Arabic => Language::English,
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Language::English => &EN,
            Language::Arabic => &AR,
        }
    }
}

/// Every user-visible string
#[derive(Debug)]
pub struct Strings {
    pub window_title: &'static str,
    pub header: &'static str,
    pub input_label: &'static str,
    pub input_placeholder: &'static str,
    pub ec_label: &'static str,
    pub ec_info_button: &'static str,
    pub ec_info_title: &'static str,
    pub ec_info_intro: &'static str,
    /// Names for L, M, Q, H
    pub ec_names: [&'static str; 4],
    pub fill_color: &'static str,
    pub background_color: &'static str,
    pub pick_logo: &'static str,
    pub remove_logo: &'static str,
    pub logo_dialog_title: &'static str,
    pub image_files: &'static str,
    pub save_button: &'static str,
    pub save_dialog_title: &'static str,
    pub png_files: &'static str,
    pub all_files: &'static str,
    pub reset_button: &'static str,
    pub preview_label: &'static str,
    pub saved_at: &'static str,
    /// Label of the toggle button: names the language it switches to
    pub switch_language: &'static str,
    pub error_title: &'static str,
    pub warning_title: &'static str,
    pub encode_failed: &'static str,
    pub logo_load_failed: &'static str,
    pub logo_embed_failed: &'static str,
    pub save_failed: &'static str,
    pub nothing_to_save: &'static str,
    pub footer: &'static str,
}

impl Strings {
    /// Body of the error-correction info dialog
    pub fn ec_info(&self) -> String {
        let mut body = String::from(self.ec_info_intro);
        for (level, name) in EcLevel::ALL.iter().zip(self.ec_names) {
            let _ = write!(body, "\n{} - {}: ~{}%", level.letter(), name, level.recovery_percent());
        }
        body
    }

    /// Dialog body for `error`
    ///
    /// The dialog prefix already names what failed, so only the path and the
    /// underlying cause are added here.
    pub fn error_detail(&self, error: &QrError) -> String {
        match error {
            QrError::Encoding(cause) | QrError::LogoEmbed(cause) => cause.clone(),
            QrError::LogoLoad { path, source } | QrError::Save { path, source } => {
                format!("{}\n{}", path.display(), source)
            }
            QrError::NothingToSave => self.nothing_to_save.to_string(),
        }
    }

    /// Status line after a successful save
    pub fn saved_message(&self, path: &std::path::Path) -> String {
        format!("{} {}", self.saved_at, path.display())
    }
}

static EN: Strings = Strings {
    window_title: "QR Code Generator",
    header: "QR Code Generator",
    input_label: "Enter Text or URL:",
    input_placeholder: "https://example.com",
    ec_label: "Error correction:",
    ec_info_button: "?",
    ec_info_title: "Error correction levels",
    ec_info_intro: "Higher levels survive more damage (or a bigger logo) but produce a denser code.",
    ec_names: ["Low", "Medium", "Quartile", "High"],
    fill_color: "Fill color",
    background_color: "Background color",
    pick_logo: "Add logo",
    remove_logo: "Remove logo",
    logo_dialog_title: "Choose a logo",
    image_files: "Images",
    save_button: "Save QR Code",
    save_dialog_title: "Save QR Code",
    png_files: "PNG Files",
    all_files: "All Files",
    reset_button: "Reset",
    preview_label: "QR Code Preview",
    saved_at: "Saved at:",
    switch_language: "العربية",
    error_title: "Error",
    warning_title: "Warning",
    encode_failed: "Failed to generate QR code:",
    logo_load_failed: "Failed to load logo:",
    logo_embed_failed: "The logo could not be embedded; showing the plain QR code.",
    save_failed: "Failed to save QR code:",
    nothing_to_save: "There is no QR code to save.",
    footer: "QR Code Generator",
};

static AR: Strings = Strings {
    window_title: "مولد رمز QR",
    header: "مولد رمز QR",
    input_label: "أدخل نصًا أو رابطًا:",
    input_placeholder: "https://example.com",
    ec_label: "تصحيح الأخطاء:",
    ec_info_button: "؟",
    ec_info_title: "مستويات تصحيح الأخطاء",
    ec_info_intro: "المستويات الأعلى تتحمل ضررًا أكبر (أو شعارًا أكبر) لكنها تنتج رمزًا أكثر كثافة.",
    ec_names: ["منخفض", "متوسط", "ربعي", "مرتفع"],
    fill_color: "لون التعبئة",
    background_color: "لون الخلفية",
    pick_logo: "إضافة شعار",
    remove_logo: "إزالة الشعار",
    logo_dialog_title: "اختر شعارًا",
    image_files: "صور",
    save_button: "حفظ الرمز",
    save_dialog_title: "حفظ رمز QR",
    png_files: "ملفات PNG",
    all_files: "كل الملفات",
    reset_button: "إعادة تعيين",
    preview_label: "معاينة الرمز",
    saved_at: "تم الحفظ في:",
    switch_language: "English",
    error_title: "خطأ",
    warning_title: "تحذير",
    encode_failed: "فشل إنشاء رمز QR:",
    logo_load_failed: "فشل تحميل الشعار:",
    logo_embed_failed: "تعذر دمج الشعار؛ يتم عرض الرمز بدونه.",
    save_failed: "فشل حفظ رمز QR:",
    nothing_to_save: "لا يوجد رمز QR لحفظه.",
    footer: "مولد رمز QR",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_swaps_between_two_languages() {
        assert_eq!(Language::English.toggled(), Language::Arabic);
        assert_eq!(Language::English.toggled().toggled(), Language::English);
    }

    #[test]
    fn test_tags_match_config_values() {
        for language in [Language::English, Language::Arabic] {
            let json = format!("\"{}\"", language.tag());
            assert_eq!(serde_json::from_str::<Language>(&json).unwrap(), language);
        }
        assert!(serde_json::from_str::<Language>("\"fr\"").is_err());
    }

    #[test]
    fn test_tables_differ() {
        let en = Language::English.strings();
        let ar = Language::Arabic.strings();
        assert_ne!(en.save_button, ar.save_button);
        assert_ne!(en.reset_button, ar.reset_button);
    }

    #[test]
    fn test_ec_info_lists_every_level() {
        let info = Language::English.strings().ec_info();
        assert!(info.contains("L - Low: ~7%"));
        assert!(info.contains("H - High: ~30%"));
        assert_eq!(info.lines().count(), 5);
    }

    #[test]
    fn test_saved_message() {
        let message = Language::English.strings().saved_message(std::path::Path::new("/tmp/qr.png"));
        assert_eq!(message, "Saved at: /tmp/qr.png");
    }

    #[test]
    fn test_error_detail_has_no_english_framing() {
        let ar = Language::Arabic.strings();
        let errors = [
            QrError::Encoding("data too long".to_string()),
            QrError::Save {
                path: std::path::PathBuf::from("/tmp/qr.ico"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied).into(),
            },
            QrError::NothingToSave,
        ];

        for error in &errors {
            let detail = ar.error_detail(error);
            assert!(!detail.contains("failed to"), "{}", detail);
            assert!(!detail.contains(&error.to_string()), "{}", detail);
        }
        assert_eq!(ar.error_detail(&errors[0]), "data too long");
        assert!(ar.error_detail(&errors[1]).starts_with("/tmp/qr.ico\n"));
        assert_eq!(ar.error_detail(&QrError::NothingToSave), ar.nothing_to_save);
    }
}
