// ClipUtil - Structure de configuration et valeurs par defaut
//
// Ce module definit la structure `Settings` qui centralise les
// parametres d'une session : suppression des erreurs, nombre de
// tentatives d'ouverture, style d'en-tete HTML et format par defaut.
//
// # Chargement
// `Settings::from_env()` lit les variables CLIPUTIL_*. Les valeurs
// manquantes ou illisibles conservent leur defaut. Les valeurs hors
// bornes sont clampees (ex: tentatives d'ouverture 1..3).
//
// `Settings::from_lookup(f)` applique la meme logique a une fonction de
// recherche quelconque (utilise par les tests).

use tracing::debug;

use crate::constants::*;
use crate::format::ClipboardFormat;
use crate::html::HeaderStyle;

/// Configuration d'une session du presse-papiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Avale les echecs de GlobalUnlock et les erreurs levees dans une
    /// session ouverte par `with_open` (elles sont journalisees).
    pub suppress_errors: bool,
    /// Tentatives d'OpenClipboard avant echec (1..=3)
    pub max_open_attempts: u32,
    /// Variante de l'en-tete HTML
    pub header_style: HeaderStyle,
    /// Format utilise quand l'appelant n'en precise pas
    pub default_format: ClipboardFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            suppress_errors: true,
            max_open_attempts: MAX_OPEN_ATTEMPTS,
            header_style: HeaderStyle::ZeroPadded,
            default_format: ClipboardFormat::UnicodeText,
        }
    }
}

impl Settings {
    /// Charge la configuration depuis l'environnement du processus.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Charge la configuration depuis une fonction de recherche.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(v) = lookup(ENV_SUPPRESS_ERRORS).and_then(|v| parse_bool(&v)) {
            settings.suppress_errors = v;
        }
        if let Some(v) = lookup(ENV_OPEN_ATTEMPTS).and_then(|v| parse_u32(&v)) {
            settings.max_open_attempts = v.clamp(1, MAX_OPEN_ATTEMPTS);
        }
        if let Some(v) = lookup(ENV_HEADER_STYLE) {
            settings.header_style = HeaderStyle::from_str(&v);
        }
        if let Some(f) = lookup(ENV_DEFAULT_FORMAT).and_then(|v| ClipboardFormat::from_name(v.trim())) {
            settings.default_format = f;
        }

        debug!(?settings, "loaded clipboard settings");
        settings
    }

    /// Modifie la politique de suppression d'erreurs.
    pub fn suppress_errors(mut self, suppress: bool) -> Self {
        self.suppress_errors = suppress;
        self
    }

    /// Modifie le nombre de tentatives d'ouverture (clampe 1..=3).
    pub fn max_open_attempts(mut self, attempts: u32) -> Self {
        self.max_open_attempts = attempts.clamp(1, MAX_OPEN_ATTEMPTS);
        self
    }

    /// Modifie le style d'en-tete HTML.
    pub fn header_style(mut self, style: HeaderStyle) -> Self {
        self.header_style = style;
        self
    }

    /// Modifie le format par defaut.
    pub fn default_format(mut self, format: ClipboardFormat) -> Self {
        self.default_format = format;
        self
    }
}

/// Parse une valeur comme booleen.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Parse une valeur comme u32.
fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}
