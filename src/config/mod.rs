// ClipUtil - Module config
// Parametres de la session du presse-papiers
//
// Aucun fichier de configuration : les parametres ont des valeurs par
// defaut et peuvent etre surcharges par variables d'environnement.
//
// # Sous-modules
// - `settings` : structure Settings (politique de suppression d'erreurs,
//                tentatives d'ouverture, style d'en-tete HTML, format par
//                defaut) avec valeurs par defaut et validation des plages.
//
// # Utilisation
// ```rust
// let settings = Settings::from_env();
// // Les valeurs manquantes ou invalides utilisent les defauts
// ```

/// Structure de configuration et valeurs par defaut.
pub mod settings;

pub use settings::Settings;
