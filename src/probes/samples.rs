//! Sample payloads sent by the translate probe

use serde::Serialize;

/// Built-in probe payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProbePreset {
    /// Six sentences in mixed languages, auto-detected, into English
    #[value(name = "auto-en")]
    AutoToEnglish,
    /// Three English sentences declared as Spanish, into German
    #[value(name = "es-de")]
    SpanishToGerman,
}

/// Language pair and sentences for one translate probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbePayload {
    /// Source language
    pub sl: String,
    /// Target language
    pub tl: String,
    /// Sentences in send order
    pub texts: Vec<String>,
}

const AUTO_TO_ENGLISH: &[&str] = &[
    "Il fumo di tabacco è la causa più comune della condizione insieme ad \
     altri fattori, quali l'inquinamento dell'aria e la genetica, che \
     rivestono un ruolo minore.",
    "O piloto inglês Lewis Hamilton da McLaren conquistou seu primeiro \
     campeonato de pilotos com a diferença final de um ponto para o \
     brasileiro Felipe Massa da Ferrari, que ficou com a segunda \
     colocação, enquanto seu companheiro de equipe Kimi Räikkönen ficou \
     com a terceira colocação.",
    "В последние дни на британских заправках все чаще выстраиваются очереди. \
     Неожиданный дефицит бензина и дизеля отразился и на футболе, поставив \
     под угрозу срыва сотни матчей в десятках низших лиг.",
    "Jaén es una ciudad y municipio español de la comunidad autónoma de \
     Andalucía, capital de la provincia homónima. Ostenta el título de «Muy \
     Noble y Muy Leal Ciudad de Jaén, Guarda y Defendimiento de los Reinos \
     de Castilla» y es conocida como la «capital del Santo Reino».",
    "Kõige elementaarsemal tasemel asendab masintõlge ühe keele sõnad teise \
     keele omadega, kuid sellest ei piisa heaks tõlkeks, sest tuleb tunda \
     ära terved fraasid ja leida neile teises keeles vasted.",
    "Word-sense disambiguation concerns finding a suitable translation when \
     a word can have more than one meaning.",
];

const SPANISH_TO_GERMAN: &[&str] = &[
    "Machine learning is the study of computer algorithms that can improve \
     automatically through experience and by the use of data.",
    "It is seen as a part of artificial intelligence. Machine learning \
     algorithms build a model based on sample data, known as \"training \
     data\", in order to make predictions or decisions without being \
     explicitly programmed to do so.",
    "Machine learning algorithms are used in a wide variety of applications, \
     such as in medicine, email filtering, speech recognition, and computer \
     vision, where it is difficult or unfeasible to develop conventional \
     algorithms to perform the needed tasks.",
];

impl ProbePreset {
    /// Payload for this preset
    pub fn payload(self) -> ProbePayload {
        let (sl, tl, texts) = match self {
            ProbePreset::AutoToEnglish => ("auto", "en", AUTO_TO_ENGLISH),
            ProbePreset::SpanishToGerman => ("es", "de", SPANISH_TO_GERMAN),
        };
        ProbePayload::new(sl, tl, texts.iter().map(|t| t.to_string()).collect())
    }
}

impl ProbePayload {
    /// Payload with an arbitrary language pair and sentences
    pub fn new(sl: impl Into<String>, tl: impl Into<String>, texts: Vec<String>) -> Self {
        Self {
            sl: sl.into(),
            tl: tl.into(),
            texts,
        }
    }

    /// Form fields for the request body, one `q` per sentence
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        self.texts.iter().map(|t| ("q", t.as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let auto = ProbePreset::AutoToEnglish.payload();
        assert_eq!((auto.sl.as_str(), auto.tl.as_str()), ("auto", "en"));
        assert_eq!(auto.texts.len(), 6);
        assert!(auto.texts[0].contains("l'inquinamento dell'aria e la genetica, che rivestono"));
        assert!(auto.texts[2].starts_with("В последние дни"));

        let es_de = ProbePreset::SpanishToGerman.payload();
        assert_eq!((es_de.sl.as_str(), es_de.tl.as_str()), ("es", "de"));
        assert_eq!(es_de.texts.len(), 3);
        assert!(es_de.texts[1].contains("known as \"training data\", in order"));
    }

    #[test]
    fn test_line_continuations_keep_single_spaces() {
        for text in ProbePreset::AutoToEnglish.payload().texts {
            assert!(!text.contains("  "), "double space in {:?}", text);
        }
    }

    #[test]
    fn test_form_fields_preserve_order() {
        let payload = ProbePayload::new("de", "en", vec!["eins".into(), "zwei".into()]);
        assert_eq!(payload.form_fields(), vec![("q", "eins"), ("q", "zwei")]);
    }
}
