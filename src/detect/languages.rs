//! Languages the detectors may report, limited to sources opus-mt serves.

use lingua::Language;
use whatlang::Lang;

/// Detectable language: whatlang variant, lingua variant, ISO 639-1 code
pub struct SupportedLanguage {
    pub whatlang: Lang,
    pub lingua: Language,
    pub code: &'static str,
}

const fn lang(whatlang: Lang, lingua: Language, code: &'static str) -> SupportedLanguage {
    SupportedLanguage {
        whatlang,
        lingua,
        code,
    }
}

pub const SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    lang(Lang::Eng, Language::English, "en"),
    lang(Lang::Fra, Language::French, "fr"),
    lang(Lang::Deu, Language::German, "de"),
    lang(Lang::Spa, Language::Spanish, "es"),
    lang(Lang::Ita, Language::Italian, "it"),
    lang(Lang::Por, Language::Portuguese, "pt"),
    lang(Lang::Nld, Language::Dutch, "nl"),
    lang(Lang::Rus, Language::Russian, "ru"),
    lang(Lang::Cmn, Language::Chinese, "zh"),
    lang(Lang::Jpn, Language::Japanese, "ja"),
    lang(Lang::Kor, Language::Korean, "ko"),
    lang(Lang::Ara, Language::Arabic, "ar"),
    lang(Lang::Heb, Language::Hebrew, "he"),
    lang(Lang::Hin, Language::Hindi, "hi"),
    lang(Lang::Pol, Language::Polish, "pl"),
    lang(Lang::Ces, Language::Czech, "cs"),
    lang(Lang::Ukr, Language::Ukrainian, "uk"),
    lang(Lang::Bul, Language::Bulgarian, "bg"),
    lang(Lang::Ell, Language::Greek, "el"),
    lang(Lang::Tur, Language::Turkish, "tr"),
    lang(Lang::Swe, Language::Swedish, "sv"),
    lang(Lang::Dan, Language::Danish, "da"),
    lang(Lang::Fin, Language::Finnish, "fi"),
    lang(Lang::Est, Language::Estonian, "et"),
    lang(Lang::Hun, Language::Hungarian, "hu"),
    lang(Lang::Vie, Language::Vietnamese, "vi"),
    lang(Lang::Ind, Language::Indonesian, "id"),
];

pub fn whatlang_allowlist() -> Vec<Lang> {
    SUPPORTED_LANGUAGES.iter().map(|l| l.whatlang).collect()
}

pub fn lingua_languages() -> Vec<Language> {
    SUPPORTED_LANGUAGES.iter().map(|l| l.lingua).collect()
}

pub fn code_for_whatlang(lang: Lang) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.whatlang == lang)
        .map(|l| l.code)
}

pub fn code_for_lingua(language: Language) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.lingua == language)
        .map(|l| l.code)
}
