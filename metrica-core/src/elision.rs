//! # Motor de Elisão — Sinalefa e Contrações
//!
//! Detecta fusões de sons vocálicos entre palavras adjacentes de um
//! verso: a **sinalefa** ("de amor" cantado como "d'a-mor") e as
//! contrações lexicalizadas do canto ("que eu" → "qu'eu"). Cada fusão
//! reduz a soma silábica bruta do verso em exatamente **uma** sílaba —
//! convenção inteira adotada uniformemente por todo o motor.
//!
//! O "h" inicial é transparente: "de hoje" elide como "de oje".
//! No máximo um evento por fronteira de palavras; contração lexical tem
//! prioridade sobre a regra geral. O motor nunca altera o verso:
//! rodar duas vezes sobre a mesma sequência produz a mesma lista.

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::syllabifier::is_vowel;
use crate::verse::Word;

/// Tipo da fusão detectada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElisionKind {
    /// Fusão fonética geral vogal final + vogal inicial.
    Sinalefa,
    /// Contração consagrada da tabela lexical ("d'amor", "qu'eu").
    Contracao,
}

/// Uma fusão em uma fronteira de palavras do verso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElisionEvent {
    /// Índice da fronteira: entre `words[boundary]` e `words[boundary + 1]`.
    pub boundary: usize,
    pub left: String,
    pub right: String,
    pub kind: ElisionKind,
    /// Redução silábica do evento (sempre 1).
    pub reduction: usize,
}

/// A palavra termina em som de vogal?
fn ends_in_vowel_sound(word: &str) -> bool {
    word.chars().last().map(is_vowel).unwrap_or(false)
}

/// A palavra começa em som de vogal? O "h" mudo inicial é atravessado.
fn starts_with_vowel_sound(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some('h') => chars.next().map(is_vowel).unwrap_or(false),
        Some(c) => is_vowel(c),
        None => false,
    }
}

/// Detecta todos os eventos de elisão de um verso.
///
/// Recebe a sequência de palavras já analisadas e devolve no máximo um
/// [`ElisionEvent`] por fronteira. Não muta a entrada; é idempotente.
pub fn detect_elisions(lex: &Lexicon, words: &[Word]) -> Vec<ElisionEvent> {
    let mut events = Vec::new();

    for (i, pair) in words.windows(2).enumerate() {
        let left = &pair[0].normalized;
        let right = &pair[1].normalized;
        if left.is_empty() || right.is_empty() {
            continue;
        }

        if lex.is_contraction_pair(left, right) {
            events.push(ElisionEvent {
                boundary: i,
                left: left.clone(),
                right: right.clone(),
                kind: ElisionKind::Contracao,
                reduction: 1,
            });
            continue;
        }

        if ends_in_vowel_sound(left) && starts_with_vowel_sound(right) {
            events.push(ElisionEvent {
                boundary: i,
                left: left.clone(),
                right: right.clone(),
                kind: ElisionKind::Sinalefa,
                reduction: 1,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verse::analyze_word;

    fn words(lex: &Lexicon, text: &str) -> Vec<Word> {
        text.split_whitespace().map(|w| analyze_word(lex, w)).collect()
    }

    #[test]
    fn test_de_amor_contraction() {
        let lex = Lexicon::new();
        let ws = words(&lex, "de amor e de dor");
        let events = detect_elisions(&lex, &ws);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].boundary, 0);
        assert_eq!(events[0].kind, ElisionKind::Contracao);
        assert_eq!(events[0].reduction, 1);
    }

    #[test]
    fn test_general_sinalefa() {
        let lex = Lexicon::new();
        let ws = words(&lex, "minha alma canta");
        let events = detect_elisions(&lex, &ws);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ElisionKind::Sinalefa);
        assert_eq!(events[0].left, "minha");
        assert_eq!(events[0].right, "alma");
    }

    #[test]
    fn test_h_initial_is_transparent() {
        let lex = Lexicon::new();
        let ws = words(&lex, "casa hoje");
        let events = detect_elisions(&lex, &ws);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ElisionKind::Sinalefa);
    }

    #[test]
    fn test_consonant_boundary_no_event() {
        let lex = Lexicon::new();
        let ws = words(&lex, "meu coração dispara");
        assert!(detect_elisions(&lex, &ws).is_empty());
    }

    #[test]
    fn test_at_most_one_event_per_boundary() {
        let lex = Lexicon::new();
        // "que eu" é contração E fronteira vogal-vogal: conta uma vez só
        let ws = words(&lex, "que eu amo");
        let events = detect_elisions(&lex, &ws);
        let at_zero: Vec<_> = events.iter().filter(|e| e.boundary == 0).collect();
        assert_eq!(at_zero.len(), 1);
        assert_eq!(at_zero[0].kind, ElisionKind::Contracao);
    }

    #[test]
    fn test_idempotence() {
        let lex = Lexicon::new();
        let ws = words(&lex, "de amor e de esperança");
        let first = detect_elisions(&lex, &ws);
        let second = detect_elisions(&lex, &ws);
        assert_eq!(first, second);
    }
}
