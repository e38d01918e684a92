//! # Normalizador de Linhas de Letra
//!
//! Primeiro estágio do pipeline: classifica cada linha da letra
//! (verso, diretiva estrutural ou linha em branco) e produz duas visões
//! do texto — a de exibição (fiel ao original) e a de análise
//! (minúscula, sem marcação). Diretivas `[Refrão]` e rubricas `(bis)`
//! são preservadas na saída mas excluídas de toda contagem, tonicidade
//! e rima a jusante.
//!
//! Função pura: nenhum estado, nenhum efeito colateral.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Papel estrutural de uma linha dentro da letra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    /// Verso cantável: participa de contagem, rima e validação.
    Lyric,
    /// Diretiva estrutural `[Refrão]` ou rubrica de palco `(bis)`:
    /// preservada na saída, zero sílabas, fora de rima e validação.
    Directive,
    /// Linha vazia: separa estrofes.
    Blank,
}

/// Resultado da normalização de uma linha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLine {
    pub role: LineRole,
    /// Texto fiel ao original (apenas espaços externos removidos).
    pub display_text: String,
    /// Texto minúsculo para análise, com rubricas internas removidas.
    pub analysis_text: String,
}

fn directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\[[^\]]*\]|\([^)]*\))\s*$").unwrap())
}

fn inline_annotation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)").unwrap())
}

/// Normaliza uma linha bruta da letra.
///
/// - Linha vazia → [`LineRole::Blank`]
/// - Linha inteiramente `[...]` ou `(...)` → [`LineRole::Directive`]
/// - Demais → [`LineRole::Lyric`], com anotações internas `(bis)` removidas
///   apenas do texto de análise.
pub fn normalize_line(raw: &str) -> NormalizedLine {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return NormalizedLine {
            role: LineRole::Blank,
            display_text: String::new(),
            analysis_text: String::new(),
        };
    }

    if directive_re().is_match(trimmed) {
        return NormalizedLine {
            role: LineRole::Directive,
            display_text: trimmed.to_string(),
            analysis_text: String::new(),
        };
    }

    let without_annotations = inline_annotation_re().replace_all(trimmed, " ");
    let analysis_text = without_annotations
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    NormalizedLine {
        role: LineRole::Lyric,
        display_text: trimmed.to_string(),
        analysis_text,
    }
}

/// Remove diacríticos das vogais portuguesas, preservando as demais letras.
/// Usado para chaves de léxico e comparação de terminações de rima.
pub fn strip_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            'Á' | 'À' | 'Â' | 'Ã' => 'A',
            'É' | 'Ê' => 'E',
            'Í' => 'I',
            'Ó' | 'Ô' | 'Õ' => 'O',
            'Ú' | 'Ü' => 'U',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

/// Extrai as palavras do texto de análise, removendo pontuação colada
/// (vírgulas, pontos, exclamações) mas preservando apóstrofos internos
/// ("d'amor") e hífens ("guarda-chuva").
pub fn extract_words(analysis_text: &str) -> Vec<String> {
    analysis_text
        .split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '\u{2019}')
                .to_string()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        let n = normalize_line("   ");
        assert_eq!(n.role, LineRole::Blank);
        assert!(n.analysis_text.is_empty());
    }

    #[test]
    fn test_section_directive() {
        let n = normalize_line("[Refrão]");
        assert_eq!(n.role, LineRole::Directive);
        assert_eq!(n.display_text, "[Refrão]");
        assert!(n.analysis_text.is_empty());
    }

    #[test]
    fn test_stage_direction() {
        let n = normalize_line("  (solo de viola)  ");
        assert_eq!(n.role, LineRole::Directive);
        assert_eq!(n.display_text, "(solo de viola)");
    }

    #[test]
    fn test_lyric_preserves_display() {
        let n = normalize_line("Meu Coração Dispara");
        assert_eq!(n.role, LineRole::Lyric);
        assert_eq!(n.display_text, "Meu Coração Dispara");
        assert_eq!(n.analysis_text, "meu coração dispara");
    }

    #[test]
    fn test_inline_annotation_stripped_from_analysis_only() {
        let n = normalize_line("Vou voltar (bis) pra casa");
        assert_eq!(n.role, LineRole::Lyric);
        assert_eq!(n.display_text, "Vou voltar (bis) pra casa");
        assert_eq!(n.analysis_text, "vou voltar pra casa");
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("coração"), "coracao");
        assert_eq!(strip_diacritics("música"), "musica");
        assert_eq!(strip_diacritics("Água"), "Agua");
    }

    #[test]
    fn test_extract_words_strips_punctuation() {
        let words = extract_words("de amor, e de dor!");
        assert_eq!(words, vec!["de", "amor", "e", "de", "dor"]);
    }

    #[test]
    fn test_extract_words_keeps_apostrophe() {
        let words = extract_words("d'amor eu canto");
        assert_eq!(words[0], "d'amor");
    }
}
