// ClipUtil - Generation du document HTML du presse-papiers
//
// `HtmlTemplate` enveloppe le contenu de l'appelant dans le document
// attendu par les consommateurs du format "HTML Format".
//
// # Algorithme
// 1. Chaque fragment est encadre par <!--StartFragment--> et
//    <!--EndFragment-->, les blocs sont joints par des sauts de ligne.
// 2. Le resultat est enveloppe dans <body> puis <html>, ligne par ligne
//    (l'indentation de chaque ligne est conservee).
// 3. Cinq lignes d'en-tete sont ajoutees avec des offsets provisoires.
// 4. Les offsets sont cherches dans le document encode en UTF-8 :
//    debut de <html>, fin de </html>, fin du premier commentaire
//    StartFragment + 1, debut du dernier commentaire EndFragment - 1.
// 5. Les valeurs provisoires sont reecrites sur place.
//
// En style `ZeroPadded`, la largeur des champs est fixe (10 chiffres) :
// la reecriture conserve les longueurs et les offsets sont calcules une
// seule fois. En style `Plain`, la longueur de l'en-tete depend des
// valeurs et le calcul est repete jusqu'a stabilite.

use tracing::trace;

use crate::constants::{HTML_OFFSET_WIDTH, HTML_VERSION};
use crate::html::{END_FRAGMENT_MARKER, START_FRAGMENT_MARKER};

const HTML_OPEN: &str = "<html>";
const HTML_CLOSE: &str = "</html>";

const KEY_START_HTML: &str = "StartHTML:";
const KEY_END_HTML: &str = "EndHTML:";
const KEY_START_FRAGMENT: &str = "StartFragment:";
const KEY_END_FRAGMENT: &str = "EndFragment:";

/// Offset non calcule.
const UNSET: i64 = -1;

/// Nombre max de passes en style `Plain` (converge en 2 ou 3).
const MAX_PLAIN_PASSES: usize = 8;

/// Separateurs de lignes reconnus lors de l'enveloppement.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Variante de l'en-tete : largeur fixe ou entiers simples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// Offsets sur 10 chiffres completes par des zeros
    #[default]
    ZeroPadded,
    /// Offsets sans remplissage (ancienne variante)
    Plain,
}

impl HeaderStyle {
    /// Parse depuis une chaine.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "plain" => Self::Plain,
            _ => Self::ZeroPadded,
        }
    }

    /// Serialise en chaine.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ZeroPadded => "zero-padded",
            Self::Plain => "plain",
        }
    }

    fn render(&self, value: i64) -> String {
        match self {
            Self::ZeroPadded => format!("{:0>width$}", value, width = HTML_OFFSET_WIDTH),
            Self::Plain => value.to_string(),
        }
    }
}

/// Offsets absolus (en octets) d'un document genere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlOffsets {
    pub start_html: usize,
    pub end_html: usize,
    pub start_fragment: usize,
    pub end_fragment: usize,
}

/// Constructeur du document HTML du presse-papiers.
#[derive(Debug, Clone)]
pub struct HtmlTemplate {
    content: String,
    fragments: Vec<String>,
    source_url: Option<String>,
    style: HeaderStyle,
    start_html: i64,
    end_html: i64,
    start_fragment: i64,
    end_fragment: i64,
}

impl HtmlTemplate {
    /// Cree un modele pour un contenu unique.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            fragments: Vec::new(),
            source_url: None,
            style: HeaderStyle::default(),
            start_html: UNSET,
            end_html: UNSET,
            start_fragment: UNSET,
            end_fragment: UNSET,
        }
    }

    /// Cree un modele a plusieurs fragments, chacun encadre separement.
    pub fn with_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut template = Self::new(String::new());
        template.fragments = fragments.into_iter().map(Into::into).collect();
        template
    }

    /// Choisit la variante de l'en-tete.
    pub fn header_style(mut self, style: HeaderStyle) -> Self {
        self.style = style;
        self
    }

    /// Ajoute une ligne SourceURL a l'en-tete.
    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Contenu d'origine.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Offsets du dernier document genere, None avant `generate`.
    pub fn offsets(&self) -> Option<HtmlOffsets> {
        Some(HtmlOffsets {
            start_html: usize::try_from(self.start_html).ok()?,
            end_html: usize::try_from(self.end_html).ok()?,
            start_fragment: usize::try_from(self.start_fragment).ok()?,
            end_fragment: usize::try_from(self.end_fragment).ok()?,
        })
    }

    /// Genere le document complet, en-tete compris.
    pub fn generate(&mut self) -> String {
        let fragments: Vec<&str> = if self.fragments.is_empty() {
            vec![self.content.as_str()]
        } else {
            self.fragments.iter().map(String::as_str).collect()
        };
        let body = wrap_document(&wrap_fragments(&fragments));

        let document = match self.style {
            HeaderStyle::ZeroPadded => self.generate_fixed(&body),
            HeaderStyle::Plain => self.generate_plain(&body),
        };
        trace!(
            bytes = document.len(),
            start_html = self.start_html,
            end_html = self.end_html,
            start_fragment = self.start_fragment,
            end_fragment = self.end_fragment,
            "generated HTML clipboard document"
        );
        document
    }

    /// Largeur fixe : un seul calcul puis reecriture sur place.
    fn generate_fixed(&mut self, body: &str) -> String {
        let (mut document, header_len) = self.assemble(body);
        self.store(locate(&document, header_len));
        for (key, value) in self.fields() {
            rewrite_field(&mut document, header_len, key, &self.style.render(value));
        }
        document
    }

    /// Entiers simples : recalcul jusqu'a ce que l'en-tete soit stable.
    fn generate_plain(&mut self, body: &str) -> String {
        for _ in 0..MAX_PLAIN_PASSES {
            let (document, header_len) = self.assemble(body);
            let found = locate(&document, header_len);
            if found == self.current() {
                return document;
            }
            self.store(found);
        }
        self.assemble(body).0
    }

    /// En-tete + corps ; retourne aussi la position du corps.
    fn assemble(&self, body: &str) -> (String, usize) {
        let mut lines = vec![format!("Version:{}", HTML_VERSION)];
        for (key, value) in self.fields() {
            lines.push(format!("{}{}", key, self.style.render(value)));
        }
        if let Some(url) = &self.source_url {
            lines.push(format!("SourceURL:{}", url));
        }
        let header = lines.join("\n");
        let header_len = header.len() + 1;
        (format!("{}\n{}", header, body), header_len)
    }

    fn fields(&self) -> [(&'static str, i64); 4] {
        [
            (KEY_START_HTML, self.start_html),
            (KEY_END_HTML, self.end_html),
            (KEY_START_FRAGMENT, self.start_fragment),
            (KEY_END_FRAGMENT, self.end_fragment),
        ]
    }

    fn current(&self) -> [i64; 4] {
        [self.start_html, self.end_html, self.start_fragment, self.end_fragment]
    }

    fn store(&mut self, found: [i64; 4]) {
        self.start_html = found[0];
        self.end_html = found[1];
        self.start_fragment = found[2];
        self.end_fragment = found[3];
    }
}

/// Encadre chaque fragment par les commentaires de fragment.
fn wrap_fragments(fragments: &[&str]) -> String {
    let mut parts = Vec::with_capacity(fragments.len() * 3);
    for fragment in fragments {
        parts.push(START_FRAGMENT_MARKER);
        parts.push(fragment);
        parts.push(END_FRAGMENT_MARKER);
    }
    parts.join("\n")
}

/// Enveloppe le bloc dans <body> puis <html>, ligne par ligne.
fn wrap_document(block: &str) -> String {
    let mut lines = vec![HTML_OPEN, "<body>"];
    lines.extend(split_lines(block));
    lines.push("</body>");
    lines.push(HTML_CLOSE);
    lines.join("\n")
}

/// Decoupe en lignes sans separateur final ("\r\n" compte pour un seul).
fn split_lines(s: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        match rest.find(LINE_BREAKS) {
            Some(pos) => {
                lines.push(&rest[..pos]);
                let skip = if rest[pos..].starts_with("\r\n") {
                    2
                } else {
                    rest[pos..].chars().next().map_or(1, char::len_utf8)
                };
                rest = &rest[pos + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Cherche les quatre offsets dans le corps du document.
fn locate(document: &str, header_len: usize) -> [i64; 4] {
    let body = &document[header_len..];
    let at = |pos: usize| (pos + header_len) as i64;

    let start_html = body.find(HTML_OPEN).map_or(UNSET, at);
    let end_html = body
        .rfind(HTML_CLOSE)
        .map_or(UNSET, |p| at(p) + HTML_CLOSE.len() as i64);
    // apres le commentaire et son saut de ligne
    let start_fragment = body
        .find(START_FRAGMENT_MARKER)
        .map_or(UNSET, |p| at(p) + START_FRAGMENT_MARKER.len() as i64 + 1);
    // avant le saut de ligne qui precede le commentaire
    let end_fragment = body.rfind(END_FRAGMENT_MARKER).map_or(UNSET, |p| at(p) - 1);

    [start_html, end_html, start_fragment, end_fragment]
}

/// Remplace la valeur d'un champ de l'en-tete, jusqu'a la fin de sa ligne.
fn rewrite_field(document: &mut String, header_len: usize, key: &str, value: &str) {
    let Some(pos) = document[..header_len].find(key) else {
        return;
    };
    let start = pos + key.len();
    let end = document[start..header_len]
        .find('\n')
        .map_or(header_len, |p| start + p);
    document.replace_range(start..end, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::header::HtmlHeader;
    use pretty_assertions::assert_eq;

    fn generate(content: &str) -> (String, HtmlOffsets) {
        let mut template = HtmlTemplate::new(content);
        let document = template.generate();
        let offsets = template.offsets().unwrap();
        (document, offsets)
    }

    #[test]
    fn test_exact_document() {
        let (document, _) = generate("<html><head></head><body><h1>Hello World</h1></body></html>");
        assert_eq!(
            document,
            "Version:1.0
StartHTML:0000000100
EndHTML:0000000229
StartFragment:0000000135
EndFragment:0000000194
<html>
<body>
<!--StartFragment-->
<html><head></head><body><h1>Hello World</h1></body></html>
<!--EndFragment-->
</body>
</html>"
        );
    }

    #[test]
    fn test_fragment_and_html_slices() {
        let (document, o) = generate("<h1>Hello World</h1>");
        let bytes = document.as_bytes();
        assert_eq!(&bytes[o.start_fragment..o.end_fragment], b"<h1>Hello World</h1>");
        assert_eq!(
            std::str::from_utf8(&bytes[o.start_html..o.end_html]).unwrap(),
            "<html>\n<body>\n<!--StartFragment-->\n<h1>Hello World</h1>\n<!--EndFragment-->\n</body>\n</html>"
        );
        assert!(document.contains("<h1>Hello World</h1>"));
    }

    #[test]
    fn test_offsets_unset_before_generate() {
        let mut template = HtmlTemplate::new("<b>x</b>");
        assert_eq!(template.offsets(), None);
        template.generate();
        assert!(template.offsets().is_some());
    }

    #[test]
    fn test_offsets_monotonic() {
        let samples = [
            "a",
            "<b>hello world</b>",
            "<html><body><b>hello world</b><body></html>",
            "\n        <h1>Hello World!</h1>\n        <p>This is a paragraph...</p>",
            "caf\u{e9} \u{20ac} \u{1f600}",
            "<!--StartFragment-->nested<!--EndFragment-->",
        ];
        for sample in samples {
            let (document, o) = generate(sample);
            assert!(o.start_html < o.start_fragment, "{sample}");
            assert!(o.start_fragment <= o.end_fragment, "{sample}");
            assert!(o.end_fragment < o.end_html, "{sample}");
            assert_eq!(o.end_html, document.len(), "{sample}");
        }
    }

    #[test]
    fn test_empty_content() {
        let (document, o) = generate("");
        assert_eq!(o.start_fragment, o.end_fragment);
        assert!(document.ends_with("<!--StartFragment-->\n\n<!--EndFragment-->\n</body>\n</html>"));
    }

    #[test]
    fn test_byte_offsets_not_char_offsets() {
        let content = "h\u{e9}llo w\u{f6}rld \u{20ac}";
        let (document, o) = generate(content);
        assert_eq!(&document.as_bytes()[o.start_fragment..o.end_fragment], content.as_bytes());
    }

    #[test]
    fn test_indentation_preserved() {
        let content = "\n        <h1>Hello World!</h1>\n        <p>This is a paragraph...</p>";
        let (document, _) = generate(content);
        assert!(document.contains(
            "<!--StartFragment-->\n\n        <h1>Hello World!</h1>\n        <p>This is a paragraph...</p>\n<!--EndFragment-->"
        ));
    }

    #[test]
    fn test_crlf_normalized() {
        let (document, o) = generate("<p>a</p>\r\n<p>b</p>");
        assert_eq!(&document[o.start_fragment..o.end_fragment], "<p>a</p>\n<p>b</p>");
        assert!(!document.contains('\r'));
    }

    #[test]
    fn test_multiple_fragments() {
        let mut template = HtmlTemplate::with_fragments(["<b>one</b>", "<i>two</i>"]);
        let document = template.generate();
        let o = template.offsets().unwrap();
        assert_eq!(
            &document[o.start_fragment..o.end_fragment],
            "<b>one</b>\n<!--EndFragment-->\n<!--StartFragment-->\n<i>two</i>"
        );
    }

    #[test]
    fn test_plain_header_style() {
        let content = "<h1>Hello World</h1>";
        let mut template = HtmlTemplate::new(content).header_style(HeaderStyle::Plain);
        let document = template.generate();
        let o = template.offsets().unwrap();
        assert!(document.starts_with(&format!("Version:1.0\nStartHTML:{}\n", o.start_html)));
        assert_eq!(&document[o.start_fragment..o.end_fragment], content);
        assert_eq!(&document[o.start_html..o.start_html + 6], "<html>");

        let header = HtmlHeader::parse(&document).unwrap();
        assert_eq!(header.start_html, o.start_html);
        assert_eq!(header.end_fragment, o.end_fragment);
    }

    #[test]
    fn test_source_url_line() {
        let content = "<p>linked</p>";
        let mut template = HtmlTemplate::new(content).source_url("https://example.com/page");
        let document = template.generate();
        let o = template.offsets().unwrap();
        assert!(document.contains("EndFragment:"));
        assert!(document.contains("\nSourceURL:https://example.com/page\n<html>"));
        assert_eq!(&document[o.start_fragment..o.end_fragment], content);
    }

    #[test]
    fn test_generate_is_repeatable() {
        let mut template = HtmlTemplate::new("<b>again</b>");
        let first = template.generate();
        let second = template.generate();
        assert_eq!(first, second);
    }

    #[test]
    fn test_header_style_parse() {
        assert_eq!(HeaderStyle::from_str("plain"), HeaderStyle::Plain);
        assert_eq!(HeaderStyle::from_str(" PLAIN "), HeaderStyle::Plain);
        assert_eq!(HeaderStyle::from_str("zero-padded"), HeaderStyle::ZeroPadded);
        assert_eq!(HeaderStyle::from_str("other"), HeaderStyle::ZeroPadded);
        assert_eq!(HeaderStyle::ZeroPadded.render(-1), "00000000-1");
        assert_eq!(HeaderStyle::ZeroPadded.render(135), "0000000135");
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\r\nb\rc\n"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("x\u{2028}y"), vec!["x", "y"]);
        assert!(split_lines("").is_empty());
    }
}
