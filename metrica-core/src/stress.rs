//! # Localizador de Tonicidade
//!
//! Resolve a sílaba tônica de uma palavra silabificada, em ordem de
//! prioridade:
//!
//! 1. **Acento gráfico**: se alguma sílaba contém vogal acentuada
//!    (´ ^ ` ~), ela é a tônica — determinístico, prioridade máxima.
//! 2. **Tabela de exceções** do léxico (palavra minúscula sem
//!    diacríticos): cobre vocabulário de canção digitado sem acento
//!    ("coracao", "musica").
//! 3. **Regra padrão**: paroxítona para terminações átonas típicas
//!    (a, e, o, as, es, os, am, em, ens), oxítona para as demais — o
//!    padrão estatisticamente dominante do português.
//!
//! A resolução é **total**: toda palavra não-vazia recebe exatamente uma
//! classe tônica e um índice `0 ≤ i < número de sílabas`. Nunca falha.

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::normalizer::strip_diacritics;
use crate::syllabifier::{is_accented_vowel, Syllable};

/// Posição da sílaba tônica contada do fim da palavra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressClass {
    /// Tônica na última sílaba: "a-MOR", "can-TAR".
    Oxitona,
    /// Tônica na penúltima: "ca-SA", "sau-DA-de".
    Paroxitona,
    /// Tônica na antepenúltima: "MÚ-si-ca".
    Proparoxitona,
}

impl StressClass {
    /// Converte a classe em índice de sílaba (base zero), saturando em 0
    /// para palavras curtas demais para a classe.
    pub fn index(&self, syllable_count: usize) -> usize {
        if syllable_count == 0 {
            return 0;
        }
        let from_end = match self {
            StressClass::Oxitona => 1,
            StressClass::Paroxitona => 2,
            StressClass::Proparoxitona => 3,
        };
        syllable_count.saturating_sub(from_end.min(syllable_count))
    }

    /// Nome tradicional da classe (para relatórios e UI).
    pub fn name(&self) -> &'static str {
        match self {
            StressClass::Oxitona => "oxítona",
            StressClass::Paroxitona => "paroxítona",
            StressClass::Proparoxitona => "proparoxítona",
        }
    }
}

/// Terminações átonas da regra padrão: palavra terminada em uma delas é
/// paroxítona; qualquer outra terminação indica oxítona.
const PAROXITONE_ENDINGS: &[&str] = &["ens", "am", "em", "as", "es", "os", "a", "e", "o"];

/// Resultado da localização: classe, índice e a origem da decisão.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResolution {
    pub class: StressClass,
    /// Índice (base zero) da sílaba tônica dentro da palavra.
    pub index: usize,
    /// "acento_grafico", "excecao_lexical" ou "regra_padrao".
    pub source: String,
}

/// Localiza a sílaba tônica de uma palavra já silabificada.
///
/// `normalized` é a grafia minúscula da palavra (com diacríticos, se
/// houver). Palavra vazia ou sem sílabas → índice 0, nunca erro.
pub fn locate_stress(lex: &Lexicon, normalized: &str, syllables: &[Syllable]) -> StressResolution {
    let count = syllables.len();
    if count <= 1 {
        return StressResolution {
            class: StressClass::Oxitona,
            index: 0,
            source: "regra_padrao".to_string(),
        };
    }

    // 1. Acento gráfico: a última sílaba acentuada vence (cobre o raro
    //    caso de duplo acento em compostos)
    if let Some(i) = syllables
        .iter()
        .rposition(|s| s.text.chars().any(is_accented_vowel))
    {
        return StressResolution {
            class: class_from_index(i, count),
            index: i,
            source: "acento_grafico".to_string(),
        };
    }

    // 2. Tabela de exceções, chave sem diacríticos
    let stripped = strip_diacritics(normalized);
    if let Some(class) = lex.stress_exception(&stripped) {
        return StressResolution {
            index: class.index(count),
            class,
            source: "excecao_lexical".to_string(),
        };
    }

    // 3. Regra padrão por terminação
    let class = if PAROXITONE_ENDINGS.iter().any(|end| stripped.ends_with(end)) {
        StressClass::Paroxitona
    } else {
        StressClass::Oxitona
    };
    StressResolution {
        index: class.index(count),
        class,
        source: "regra_padrao".to_string(),
    }
}

fn class_from_index(index: usize, count: usize) -> StressClass {
    match count - 1 - index {
        0 => StressClass::Oxitona,
        1 => StressClass::Paroxitona,
        _ => StressClass::Proparoxitona,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syllabifier::syllabify;

    fn resolve(word: &str) -> StressResolution {
        let lex = Lexicon::new();
        locate_stress(&lex, word, &syllabify(word))
    }

    #[test]
    fn test_graphic_accent_wins() {
        // "água": acento na primeira sílaba → índice 0
        let r = resolve("água");
        assert_eq!(r.index, 0);
        assert_eq!(r.source, "acento_grafico");
        assert_eq!(r.class, StressClass::Paroxitona);
    }

    #[test]
    fn test_tilde_counts_as_accent() {
        let r = resolve("coração");
        assert_eq!(r.index, 2);
        assert_eq!(r.class, StressClass::Oxitona);
    }

    #[test]
    fn test_lexical_exception_without_accent() {
        // Digitação informal sem acento: a tabela corrige
        let r = resolve("musica");
        assert_eq!(r.class, StressClass::Proparoxitona);
        assert_eq!(r.index, 0);
        assert_eq!(r.source, "excecao_lexical");

        let r = resolve("coracao");
        assert_eq!(r.class, StressClass::Oxitona);
        assert_eq!(r.index, 2);
    }

    #[test]
    fn test_default_paroxitone() {
        let r = resolve("casa");
        assert_eq!(r.class, StressClass::Paroxitona);
        assert_eq!(r.index, 0);
        assert_eq!(r.source, "regra_padrao");

        let r = resolve("saudade");
        assert_eq!(r.index, 1);
    }

    #[test]
    fn test_default_oxitone_consonant_ending() {
        let r = resolve("cantar");
        assert_eq!(r.class, StressClass::Oxitona);
        assert_eq!(r.index, 1);

        let r = resolve("feliz");
        assert_eq!(r.class, StressClass::Oxitona);
    }

    #[test]
    fn test_totality_in_range() {
        let lex = Lexicon::new();
        for word in ["amor", "a", "pssst", "saudade", "música", "x", "uruguai"] {
            let syls = syllabify(word);
            let r = locate_stress(&lex, word, &syls);
            assert!(r.index < syls.len().max(1), "índice fora do intervalo em {word}");
        }
    }

    #[test]
    fn test_monosyllable_is_index_zero() {
        assert_eq!(resolve("dor").index, 0);
        assert_eq!(resolve("que").index, 0);
    }
}
