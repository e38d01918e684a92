//! # Verso — Modelo de Dados e Contador Poético
//!
//! Constrói as entidades centrais do motor ([`Word`], [`Line`]) compondo
//! normalizador, silabificador e localizador de tonicidade, e implementa
//! a **contagem poética** de um verso — a única fonte de verdade para
//! "quantas sílabas cantáveis tem esta linha":
//!
//! ```text
//! bruta    = Σ sílabas(palavra)
//! reduzida = bruta − Σ reduções de elisão
//! poética  = min(reduzida, posição acumulada da última tônica do verso)
//! ```
//!
//! Sílabas átonas depois da última tônica não contam, espelhando a
//! escansão do verso cantado ("can-to pra vo-**cê**" conta até "cê";
//! "á-gua" sozinha conta 1). Todo componente que precisa de contagem
//! chama [`measure_line`] — ninguém rederiva o número por conta própria.
//!
//! Tudo aqui é puro e recomputado a cada chamada: nenhuma contagem é
//! armazenada fora do [`Measure`] devolvido.

use serde::{Deserialize, Serialize};

use crate::elision::{detect_elisions, ElisionEvent};
use crate::lexicon::Lexicon;
use crate::normalizer::{extract_words, normalize_line, LineRole};
use crate::stress::{locate_stress, StressClass};
use crate::syllabifier::{syllabify, Syllable};

/// Uma palavra analisada: grafia original, forma normalizada, sílabas e
/// tônica resolvida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Grafia como apareceu na linha.
    pub original: String,
    /// Minúscula, sem pontuação colada (diacríticos preservados).
    pub normalized: String,
    pub syllables: Vec<Syllable>,
    /// Índice (base zero) da sílaba tônica.
    pub stress_index: usize,
    pub stress_class: StressClass,
}

impl Word {
    pub fn syllable_count(&self) -> usize {
        self.syllables.len()
    }
}

/// Uma linha da letra: texto bruto preservado, papel estrutural e
/// sequência ordenada de palavras analisadas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Texto de exibição, fiel ao original.
    pub display_text: String,
    pub role: LineRole,
    pub words: Vec<Word>,
}

impl Line {
    /// Linha sem conteúdo cantável (diretiva, branco ou sem palavras)?
    pub fn is_countable(&self) -> bool {
        self.role == LineRole::Lyric && !self.words.is_empty()
    }
}

/// Medição completa de um verso, derivada — nunca armazenada no [`Line`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Soma bruta das sílabas de todas as palavras.
    pub raw_count: usize,
    /// Bruta menos as reduções de elisão.
    pub reduced_count: usize,
    /// Contagem cantável: reduzida, limitada à última tônica do verso.
    pub poetic_count: usize,
    /// Posição acumulada (base 1) da sílaba tônica da última palavra.
    pub stress_offset: usize,
    pub elisions: Vec<ElisionEvent>,
}

impl Measure {
    fn empty() -> Self {
        Measure {
            raw_count: 0,
            reduced_count: 0,
            poetic_count: 0,
            stress_offset: 0,
            elisions: vec![],
        }
    }
}

/// Analisa uma única palavra (grafia livre, com ou sem pontuação colada).
pub fn analyze_word(lex: &Lexicon, raw: &str) -> Word {
    let normalized: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '\u{2019}' || *c == '-')
        .collect();
    let syllables = syllabify(&normalized);
    let stress = locate_stress(lex, &normalized, &syllables);
    Word {
        original: raw.to_string(),
        normalized,
        syllables,
        stress_index: stress.index,
        stress_class: stress.class,
    }
}

/// Analisa uma linha bruta da letra: normaliza, extrai palavras e resolve
/// sílabas e tônicas. Linhas diretivas/brancas saem sem palavras.
pub fn analyze_line(lex: &Lexicon, raw: &str) -> Line {
    let normalized = normalize_line(raw);
    let words = if normalized.role == LineRole::Lyric {
        extract_words(&normalized.analysis_text)
            .iter()
            .map(|w| analyze_word(lex, w))
            .collect()
    } else {
        vec![]
    };
    Line {
        display_text: normalized.display_text,
        role: normalized.role,
        words,
    }
}

/// Mede um verso: contagem bruta, elisões, contagem reduzida e contagem
/// poética. **Única fonte de verdade** — validador, classificador de rima
/// e corretor chamam esta função em vez de recontar por conta própria.
///
/// Pura e idempotente: mesma linha, mesmo resultado, sempre.
pub fn measure_line(lex: &Lexicon, line: &Line) -> Measure {
    if !line.is_countable() {
        return Measure::empty();
    }

    let raw_count: usize = line.words.iter().map(Word::syllable_count).sum();
    let elisions = detect_elisions(lex, &line.words);
    let total_reduction: usize = elisions.iter().map(|e| e.reduction).sum();
    let reduced_count = raw_count.saturating_sub(total_reduction);

    // Posição acumulada da tônica da última palavra, já descontadas as
    // elisões que a precedem (inclusive a da última fronteira, que funde
    // a primeira sílaba da última palavra com a anterior)
    let last = match line.words.last() {
        Some(last) => last,
        None => return Measure::empty(),
    };
    let prefix: usize = line.words[..line.words.len() - 1]
        .iter()
        .map(Word::syllable_count)
        .sum();
    let stress_offset = (prefix + last.stress_index + 1).saturating_sub(total_reduction);
    let stress_offset = stress_offset.max(1).min(reduced_count.max(1));

    let poetic_count = reduced_count.min(stress_offset);

    Measure {
        raw_count,
        reduced_count,
        poetic_count,
        stress_offset,
        elisions,
    }
}

/// Atalho: contagem poética de um texto de linha bruto.
pub fn poetic_count_of(lex: &Lexicon, raw_line: &str) -> usize {
    let line = analyze_line(lex, raw_line);
    measure_line(lex, &line).poetic_count
}

/// Escansão legível do verso: sílabas separadas por hífen, palavras por
/// espaço e fronteiras elididas marcadas com o laço "‿".
pub fn scansion(lex: &Lexicon, line: &Line) -> String {
    if !line.is_countable() {
        return String::new();
    }
    let elided: Vec<usize> = detect_elisions(lex, &line.words)
        .iter()
        .map(|e| e.boundary)
        .collect();

    let mut out = String::new();
    for (i, word) in line.words.iter().enumerate() {
        let parts: Vec<&str> = word.syllables.iter().map(|s| s.text.as_str()).collect();
        out.push_str(&parts.join("-"));
        if i + 1 < line.words.len() {
            out.push_str(if elided.contains(&i) { "‿" } else { " " });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure(text: &str) -> Measure {
        let lex = Lexicon::new();
        let line = analyze_line(&lex, text);
        measure_line(&lex, &line)
    }

    #[test]
    fn test_agua_counts_to_tonic() {
        // "á-gua" tem 2 sílabas mas a tônica é a primeira: conta 1
        let m = measure("água");
        assert_eq!(m.raw_count, 2);
        assert_eq!(m.stress_offset, 1);
        assert_eq!(m.poetic_count, 1);
    }

    #[test]
    fn test_de_amor_e_de_dor() {
        // bruta 6, elisão "de amor" → reduzida 5, tônica final em "dor"
        let m = measure("de amor e de dor");
        assert_eq!(m.raw_count, 6);
        assert_eq!(m.elisions.len(), 1);
        assert_eq!(m.reduced_count, 5);
        assert_eq!(m.poetic_count, 5);
    }

    #[test]
    fn test_trailing_unstressed_not_counted() {
        // "eu canto a vida": can-to‿a vi-da; tônica final em "vi"
        let m = measure("eu canto a vida");
        assert_eq!(m.raw_count, 6);
        assert_eq!(m.reduced_count, 5);
        assert_eq!(m.poetic_count, 4);
    }

    #[test]
    fn test_directive_measures_zero() {
        let m = measure("[Refrão]");
        assert_eq!(m.raw_count, 0);
        assert_eq!(m.poetic_count, 0);
    }

    #[test]
    fn test_empty_line_measures_zero() {
        assert_eq!(measure("").poetic_count, 0);
    }

    #[test]
    fn test_measurement_idempotent() {
        let lex = Lexicon::new();
        let line = analyze_line(&lex, "Meu coração dispara quando te vejo");
        let a = measure_line(&lex, &line);
        let b = measure_line(&lex, &line);
        assert_eq!(a, b);
    }

    #[test]
    fn test_monotonic_elision() {
        // Acrescentar palavra iniciada em vogal após final em vogal
        // nunca soma mais que as sílabas da nova palavra
        let lex = Lexicon::new();
        let base = measure("eu canto a vida");
        let extended = measure("eu canto a vida agora");
        let added = analyze_word(&lex, "agora").syllable_count();
        assert!(extended.reduced_count <= base.reduced_count + added);
        // "vida agora" elide: soma efetiva é menor que a ingênua
        assert!(extended.reduced_count < base.raw_count + added);
    }

    #[test]
    fn test_scansion_string() {
        let lex = Lexicon::new();
        let line = analyze_line(&lex, "de amor e de dor");
        assert_eq!(scansion(&lex, &line), "de‿a-mor e de dor");
    }

    #[test]
    fn test_poetic_count_of_shortcut() {
        let lex = Lexicon::new();
        assert_eq!(poetic_count_of(&lex, "de amor e de dor"), 5);
    }
}
