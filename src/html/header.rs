// ClipUtil - Lecture de l'en-tete HTML du presse-papiers
//
// Les lignes "Cle:Valeur" sont lues jusqu'a la premiere ligne qui
// commence par '<'. Les quatre offsets et la version sont obligatoires,
// SourceURL est optionnel et les cles inconnues sont ignorees.

/// En-tete d'un document "HTML Format".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlHeader {
    pub version: String,
    pub start_html: usize,
    pub end_html: usize,
    pub start_fragment: usize,
    pub end_fragment: usize,
    pub source_url: Option<String>,
}

impl HtmlHeader {
    /// Parse l'en-tete. None si un champ obligatoire manque ou est invalide.
    pub fn parse(document: &str) -> Option<Self> {
        let mut version = None;
        let mut start_html = None;
        let mut end_html = None;
        let mut start_fragment = None;
        let mut end_fragment = None;
        let mut source_url = None;

        for line in document.split('\n') {
            let line = line.trim_end_matches('\r');
            if line.starts_with('<') {
                break;
            }
            let Some((key, value)) = line.split_once(':') else {
                break;
            };
            match key.trim() {
                "Version" => version = Some(value.trim().to_string()),
                "StartHTML" => start_html = value.trim().parse().ok(),
                "EndHTML" => end_html = value.trim().parse().ok(),
                "StartFragment" => start_fragment = value.trim().parse().ok(),
                "EndFragment" => end_fragment = value.trim().parse().ok(),
                "SourceURL" => source_url = Some(value.trim().to_string()),
                _ => {}
            }
        }

        Some(Self {
            version: version?,
            start_html: start_html?,
            end_html: end_html?,
            start_fragment: start_fragment?,
            end_fragment: end_fragment?,
            source_url,
        })
    }

    /// Fragment delimite par StartFragment/EndFragment.
    pub fn fragment<'a>(&self, document: &'a str) -> Option<&'a str> {
        document.get(self.start_fragment..self.end_fragment)
    }

    /// Document HTML delimite par StartHTML/EndHTML.
    pub fn html<'a>(&self, document: &'a str) -> Option<&'a str> {
        document.get(self.start_html..self.end_html)
    }
}

/// Extrait le fragment d'un document complet.
pub fn extract_fragment(document: &str) -> Option<&str> {
    HtmlHeader::parse(document)?.fragment(document)
}
