//! # Classificador de Rima
//!
//! Extrai de cada verso a **palavra de rima** (a última palavra com peso
//! cantado, pulando artigos e preposições átonas) e dela a **terminação**:
//! os sons da última vogal tônica até o fim. O par é então classificado
//! na taxonomia retórica tradicional:
//!
//! | Classe    | Critério                                             | Escore |
//! |-----------|------------------------------------------------------|--------|
//! | falsa     | esqueletos vocálicos totalmente distintos            | 0      |
//! | toante    | só as vogais coincidem (coda consonantal difere)     | 50     |
//! | pobre     | terminação igual, mesma classe gramatical e bucket   | 40     |
//! | rica      | classe gramatical distinta, ou concreto × abstrato   | 90–100 |
//! | perfeita  | terminação igual, classe desconhecida de algum lado  | 70     |
//!
//! Terminações de classes cantadas equivalentes (coda em "r": "-ar"/"-or";
//! nasais /ãw̃/: "-ão"/"-am") contam como iguais — é a convenção que faz
//! "amor"/"cantar" rimarem na canção popular.
//!
//! A relação é simétrica no campo `kind`: `classify(a, b)` e
//! `classify(b, a)` dão a mesma classe.

use serde::{Deserialize, Serialize};

use crate::lexicon::{Concreteness, GramClass, Lexicon};
use crate::normalizer::strip_diacritics;
use crate::syllabifier::{is_accented_vowel, is_vowel};
use crate::verse::{Line, Word};

/// Classe de qualidade de rima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhymeKind {
    Falsa,
    Toante,
    Pobre,
    Rica,
    Perfeita,
}

impl RhymeKind {
    pub fn name(&self) -> &'static str {
        match self {
            RhymeKind::Falsa => "falsa",
            RhymeKind::Toante => "toante",
            RhymeKind::Pobre => "pobre",
            RhymeKind::Rica => "rica",
            RhymeKind::Perfeita => "perfeita",
        }
    }
}

/// Resultado da classificação de um par de terminações.
/// Derivado e imutável: recalculado a cada chamada, nunca cacheado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhymeQuality {
    pub kind: RhymeKind,
    /// Escore 0–100 usado pelos perfis de gênero como corte de qualidade.
    pub score: u8,
    pub word_a: String,
    pub word_b: String,
    pub ending_a: String,
    pub ending_b: String,
    /// Explicação legível da decisão, para o relatório.
    pub justification: String,
}

/// Terminação de rima de uma palavra analisada: da última vogal tônica
/// (a vogal acentuada ou a mais forte do núcleo tônico) até o fim.
pub fn rhyme_ending(word: &Word) -> String {
    let stressed = match word.syllables.get(word.stress_index) {
        Some(s) => s,
        None => return String::new(),
    };
    let chars: Vec<char> = stressed.text.chars().collect();
    let start = chars
        .iter()
        .position(|c| is_accented_vowel(*c))
        .or_else(|| {
            chars
                .iter()
                .position(|c| is_vowel(*c) && !matches!(c, 'i' | 'u' | 'ü'))
        })
        .or_else(|| chars.iter().position(|c| is_vowel(*c)))
        .unwrap_or(0);

    let mut ending: String = chars[start..].iter().collect();
    for syl in &word.syllables[word.stress_index + 1..] {
        ending.push_str(&syl.text);
    }
    ending
}

/// A palavra de rima de um verso: a última palavra que não é funcional
/// átona; se todas forem funcionais, vale a última mesmo.
pub fn rhyme_word<'a>(lex: &Lexicon, line: &'a Line) -> Option<&'a Word> {
    line.words
        .iter()
        .rev()
        .find(|w| !lex.is_function_word(&strip_diacritics(&w.normalized)))
        .or_else(|| line.words.last())
}

fn vowel_skeleton(ending: &str) -> String {
    ending.chars().filter(|c| is_vowel(*c)).collect()
}

/// Classifica o par de palavras finais de dois versos.
pub fn classify_words(lex: &Lexicon, a: &Word, b: &Word) -> RhymeQuality {
    let ending_a = rhyme_ending(a);
    let ending_b = rhyme_ending(b);
    let cmp_a = strip_diacritics(&ending_a);
    let cmp_b = strip_diacritics(&ending_b);

    let full_match = cmp_a == cmp_b || lex.same_ending_class(&cmp_a, &cmp_b);

    let (kind, score, justification) = if full_match && !cmp_a.is_empty() {
        classify_matched(lex, a, b, &ending_a, &ending_b)
    } else if !vowel_skeleton(&cmp_a).is_empty()
        && vowel_skeleton(&cmp_a) == vowel_skeleton(&cmp_b)
    {
        (
            RhymeKind::Toante,
            50,
            format!(
                "rima toante: as vogais de \"{ending_a}\" e \"{ending_b}\" coincidem, mas a coda consonantal difere"
            ),
        )
    } else {
        (
            RhymeKind::Falsa,
            0,
            format!("sem rima: \"{ending_a}\" e \"{ending_b}\" não compartilham som de terminação"),
        )
    };

    RhymeQuality {
        kind,
        score,
        word_a: a.normalized.clone(),
        word_b: b.normalized.clone(),
        ending_a,
        ending_b,
        justification,
    }
}

/// Terminações casaram: decide entre pobre, rica e perfeita por classe
/// gramatical e contraste concreto/abstrato.
fn classify_matched(
    lex: &Lexicon,
    a: &Word,
    b: &Word,
    ending_a: &str,
    ending_b: &str,
) -> (RhymeKind, u8, String) {
    let key_a = strip_diacritics(&a.normalized);
    let key_b = strip_diacritics(&b.normalized);
    let class_a = lex.word_class(&key_a);
    let class_b = lex.word_class(&key_b);

    match (class_a, class_b) {
        (Some(ca), Some(cb)) if ca != cb => {
            let conc_bonus = matches!(
                (lex.concreteness(&key_a), lex.concreteness(&key_b)),
                (Some(Concreteness::Concreto), Some(Concreteness::Abstrato))
                    | (Some(Concreteness::Abstrato), Some(Concreteness::Concreto))
            );
            (
                RhymeKind::Rica,
                if conc_bonus { 100 } else { 95 },
                format!(
                    "rima rica: \"{}\" ({}) e \"{}\" ({}) rimam em \"{ending_a}\"/\"{ending_b}\" com classes gramaticais distintas",
                    a.normalized,
                    class_name(ca),
                    b.normalized,
                    class_name(cb)
                ),
            )
        }
        (Some(ca), Some(_)) => {
            let conc_a = lex.concreteness(&key_a);
            let conc_b = lex.concreteness(&key_b);
            if matches!(
                (conc_a, conc_b),
                (Some(Concreteness::Concreto), Some(Concreteness::Abstrato))
                    | (Some(Concreteness::Abstrato), Some(Concreteness::Concreto))
            ) {
                (
                    RhymeKind::Rica,
                    90,
                    format!(
                        "rima rica: mesma classe, mas \"{}\" e \"{}\" contrastam concreto × abstrato",
                        a.normalized, b.normalized
                    ),
                )
            } else {
                (
                    RhymeKind::Pobre,
                    40,
                    format!(
                        "rima pobre: \"{}\" e \"{}\" são ambas {} com a mesma terminação",
                        a.normalized,
                        b.normalized,
                        class_name_plural(ca)
                    ),
                )
            }
        }
        _ => (
            RhymeKind::Perfeita,
            70,
            format!(
                "rima perfeita: terminações \"{ending_a}\"/\"{ending_b}\" idênticas, classe gramatical não determinada"
            ),
        ),
    }
}

fn class_name(c: GramClass) -> &'static str {
    match c {
        GramClass::Substantivo => "substantivo",
        GramClass::Verbo => "verbo",
        GramClass::Adjetivo => "adjetivo",
        GramClass::Adverbio => "advérbio",
    }
}

fn class_name_plural(c: GramClass) -> &'static str {
    match c {
        GramClass::Substantivo => "substantivos",
        GramClass::Verbo => "verbos",
        GramClass::Adjetivo => "adjetivos",
        GramClass::Adverbio => "advérbios",
    }
}

/// Classifica o par de versos pelos seus finais; `None` se algum dos dois
/// não tiver palavra de rima (diretiva, linha vazia).
pub fn classify_lines(lex: &Lexicon, a: &Line, b: &Line) -> Option<RhymeQuality> {
    let wa = rhyme_word(lex, a)?;
    let wb = rhyme_word(lex, b)?;
    Some(classify_words(lex, wa, wb))
}
