// ClipUtil - Constantes globales
//
// Ce module centralise toutes les constantes de la crate :
// - Identifiants de formats reserves par le systeme (CF_TEXT, etc.)
// - Noms des formats enregistres dynamiquement (HTML, RTF)
// - Drapeaux d'allocation de memoire globale
// - Format de l'en-tete HTML du presse-papiers
// - Politique de tentatives d'ouverture
// - Noms des variables d'environnement de configuration

/// Texte ANSI (reserve par le systeme)
pub const CF_TEXT: u32 = 1;

/// Texte UTF-16LE (reserve par le systeme)
pub const CF_UNICODETEXT: u32 = 13;

/// Identifiant de locale (reserve par le systeme)
pub const CF_LOCALE: u32 = 16;

/// Ancienne constante HTML codee en dur, remplacee a la resolution
pub const HTML_FORMAT_LEGACY: u32 = 49418;

/// Nom d'enregistrement du format HTML
pub const HTML_FORMAT_NAME: &str = "HTML Format";

/// Nom d'enregistrement du format RTF
pub const RTF_FORMAT_NAME: &str = "Rich Text Format";

/// Premier identifiant attribue aux formats enregistres
pub const REGISTERED_FORMAT_BASE: u32 = 0xC000;

/// Bloc deplacable
pub const GMEM_MOVEABLE: u32 = 0x0002;

/// Bloc initialise a zero
pub const GMEM_ZEROINIT: u32 = 0x0040;

/// Bloc deplacable initialise a zero
pub const GHND: u32 = GMEM_MOVEABLE | GMEM_ZEROINIT;

/// Nombre max de tentatives d'ouverture du presse-papiers
pub const MAX_OPEN_ATTEMPTS: u32 = 3;

/// Version declaree dans l'en-tete HTML
pub const HTML_VERSION: &str = "1.0";

/// Largeur des offsets dans l'en-tete HTML (ex: "0000001001")
pub const HTML_OFFSET_WIDTH: usize = 10;

/// Taille du tampon pour GetClipboardFormatNameW (caracteres)
pub const FORMAT_NAME_CAPACITY: usize = 256;

/// ERROR_INVALID_PARAMETER : le code n'est pas un format valide
pub const ERROR_INVALID_PARAMETER: u32 = 87;

/// Variable d'environnement du niveau de log
pub const ENV_LOG_LEVEL: &str = "LOGLEVEL";

/// Variable d'environnement de la politique de suppression d'erreurs
pub const ENV_SUPPRESS_ERRORS: &str = "CLIPUTIL_SUPPRESS_ERRORS";

/// Variable d'environnement du nombre de tentatives d'ouverture
pub const ENV_OPEN_ATTEMPTS: &str = "CLIPUTIL_OPEN_ATTEMPTS";

/// Variable d'environnement du style d'en-tete HTML
pub const ENV_HEADER_STYLE: &str = "CLIPUTIL_HEADER_STYLE";

/// Variable d'environnement du format par defaut
pub const ENV_DEFAULT_FORMAT: &str = "CLIPUTIL_DEFAULT_FORMAT";
