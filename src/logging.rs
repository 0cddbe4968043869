// ClipUtil - Initialisation des logs
//
// La crate journalise via `tracing` a chaque frontiere d'operation
// (ouverture, verrouillage, lecture, ecriture, fermeture). Le contenu des
// donnees n'est jamais journalise, seulement les tailles et formats.
//
// `init_logging` installe un subscriber `tracing-subscriber` (couche fmt +
// EnvFilter) pour les programmes qui n'en ont pas deja un.
//
// # Niveau
// Par ordre de priorite : argument explicite, variable LOGLEVEL,
// variable RUST_LOG, puis "warn". Les noms de niveaux a la Python
// (WARNING, CRITICAL) sont acceptes.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::ENV_LOG_LEVEL;

/// Variable standard de tracing-subscriber.
const ENV_RUST_LOG: &str = "RUST_LOG";

/// Niveau par defaut.
const DEFAULT_LEVEL: &str = "warn";

/// Installe le subscriber global.
///
/// Retourne false si un subscriber etait deja installe (l'appel est alors
/// sans effet).
pub fn init_logging(level: Option<&str>) -> bool {
    let directive = filter_directive(level, |key| std::env::var(key).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

/// Directive de filtre retenue pour un niveau et un environnement donnes.
fn filter_directive<F>(level: Option<&str>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    level
        .map(str::to_string)
        .or_else(|| lookup(ENV_LOG_LEVEL))
        .or_else(|| lookup(ENV_RUST_LOG))
        .map(|v| normalize_level(&v))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Convertit un nom de niveau en directive tracing.
fn normalize_level(level: &str) -> String {
    let lower = level.trim().to_lowercase();
    match lower.as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        "notset" => "trace".to_string(),
        _ => lower,
    }
}
