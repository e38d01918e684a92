//! # Validador de Prosódia
//!
//! Aplica um [`ProsodyProfile`] verso a verso e emite uma lista
//! estruturada de violações (limites rígidos de sílabas) e avisos
//! brandos (respirabilidade). Nunca altera o texto — correção é papel
//! do corretor, em outro módulo.
//!
//! Verso com vírgula ganha validação adicional: a linha é partida na
//! primeira vírgula e **cada oração é contada de forma independente**
//! pelos sublimites do perfil, pois a vírgula marca pausa de respiração
//! e o par de orações pode representar dois versos métricos em uma linha
//! impressa.
//!
//! A lista vazia de violações é o caso de sucesso — não há atalho
//! booleano escondendo dados parciais.

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::profile::ProsodyProfile;
use crate::verse::{analyze_line, measure_line, Line};

/// Tipo de violação rígida de métrica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Verso abaixo do mínimo de sílabas do perfil.
    VersoCurto,
    /// Verso acima do máximo.
    VersoLongo,
    /// Oração antes da vírgula acima do sublimite.
    OracaoAntesDaVirgula,
    /// Oração depois da vírgula acima do sublimite.
    OracaoDepoisDaVirgula,
    /// Soma das orações acima do teto conjunto.
    SomaDasOracoes,
}

/// Uma violação rígida em um verso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub line_index: usize,
    pub measured: usize,
    pub limit: usize,
    pub kind: ViolationKind,
}

/// Tipo de aviso brando de respirabilidade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    ExcessoDePalavras,
    ExcessoDeCaracteres,
}

/// Um aviso brando (não bloqueia, não dispara correção).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub line_index: usize,
    pub measured: usize,
    pub limit: usize,
    pub kind: WarningKind,
}

/// Relatório completo da validação de uma letra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    pub warnings: Vec<Warning>,
}

impl ValidationReport {
    /// Sem violações rígidas? (avisos não contam)
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Valida uma letra inteira contra o perfil. Linhas não-contáveis
/// (diretivas, brancas) são ignoradas; a entrada nunca é mutada.
pub fn validate_lyric(lex: &Lexicon, lines: &[Line], profile: &ProsodyProfile) -> ValidationReport {
    let mut report = ValidationReport {
        violations: vec![],
        warnings: vec![],
    };
    for (index, line) in lines.iter().enumerate() {
        validate_line(lex, index, line, profile, &mut report);
    }
    report
}

fn validate_line(
    lex: &Lexicon,
    index: usize,
    line: &Line,
    profile: &ProsodyProfile,
    report: &mut ValidationReport,
) {
    if !line.is_countable() {
        return;
    }

    let measure = measure_line(lex, line);
    let count = measure.poetic_count;

    if count < profile.min_syllables {
        report.violations.push(Violation {
            line_index: index,
            measured: count,
            limit: profile.min_syllables,
            kind: ViolationKind::VersoCurto,
        });
    }
    if count > profile.max_syllables {
        report.violations.push(Violation {
            line_index: index,
            measured: count,
            limit: profile.max_syllables,
            kind: ViolationKind::VersoLongo,
        });
    }

    // Sublimites de vírgula: cada oração contada de forma independente
    if let Some((before, after)) = line.display_text.split_once(',') {
        let limits = &profile.comma_clause;
        let before_count = clause_count(lex, before);
        let after_count = clause_count(lex, after);

        if before_count > limits.max_before {
            report.violations.push(Violation {
                line_index: index,
                measured: before_count,
                limit: limits.max_before,
                kind: ViolationKind::OracaoAntesDaVirgula,
            });
        }
        if after_count > limits.max_after {
            report.violations.push(Violation {
                line_index: index,
                measured: after_count,
                limit: limits.max_after,
                kind: ViolationKind::OracaoDepoisDaVirgula,
            });
        }
        if before_count + after_count > limits.total_max {
            report.violations.push(Violation {
                line_index: index,
                measured: before_count + after_count,
                limit: limits.total_max,
                kind: ViolationKind::SomaDasOracoes,
            });
        }
    }

    // Respirabilidade: avisos brandos, distintos das violações
    let word_count = line.words.len();
    if word_count > profile.breathability.max_words {
        report.warnings.push(Warning {
            line_index: index,
            measured: word_count,
            limit: profile.breathability.max_words,
            kind: WarningKind::ExcessoDePalavras,
        });
    }
    let char_count = line.display_text.chars().count();
    if char_count > profile.breathability.max_chars {
        report.warnings.push(Warning {
            line_index: index,
            measured: char_count,
            limit: profile.breathability.max_chars,
            kind: WarningKind::ExcessoDeCaracteres,
        });
    }
}

/// Contagem poética de uma oração isolada (trecho antes/depois da vírgula),
/// medida pelo mesmo contador único de [`measure_line`].
fn clause_count(lex: &Lexicon, clause: &str) -> usize {
    let line = analyze_line(lex, clause);
    measure_line(lex, &line).poetic_count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(lex: &Lexicon, text: &str) -> Vec<Line> {
        text.lines().map(|l| analyze_line(lex, l)).collect()
    }

    fn tight_profile() -> ProsodyProfile {
        ProsodyProfile {
            genre: "teste".to_string(),
            min_syllables: 4,
            max_syllables: 7,
            comma_clause: crate::profile::CommaClauseLimits {
                max_before: 5,
                max_after: 5,
                total_max: 9,
            },
            breathability: crate::profile::BreathLimits {
                max_words: 6,
                max_chars: 30,
            },
        }
    }

    #[test]
    fn test_clean_lyric() {
        let lex = Lexicon::new();
        let ls = lines(&lex, "de amor e de dor\nsó me resta cantar");
        let report = validate_lyric(&lex, &ls, &tight_profile());
        assert!(report.is_clean(), "violações: {:?}", report.violations);
    }

    #[test]
    fn test_too_long_line() {
        let lex = Lexicon::new();
        let ls = lines(&lex, "eu caminhava sozinho pela estrada comprida do sertão");
        let report = validate_lyric(&lex, &ls, &tight_profile());
        assert!(report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::VersoLongo && v.line_index == 0));
    }

    #[test]
    fn test_too_short_line() {
        let lex = Lexicon::new();
        let ls = lines(&lex, "amor");
        let report = validate_lyric(&lex, &ls, &tight_profile());
        assert!(report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::VersoCurto));
    }

    #[test]
    fn test_directive_ignored() {
        let lex = Lexicon::new();
        let ls = lines(&lex, "[Refrão]\n(bis)\n");
        let report = validate_lyric(&lex, &ls, &tight_profile());
        assert!(report.is_clean());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_comma_clauses_counted_independently() {
        let lex = Lexicon::new();
        // Oração longa depois da vírgula dispara o sublimite
        let ls = lines(
            &lex,
            "vem cá, eu caminhava sozinho pela estrada do sertão",
        );
        let report = validate_lyric(&lex, &ls, &tight_profile());
        assert!(report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::OracaoDepoisDaVirgula));
    }

    #[test]
    fn test_comma_clause_before_limit() {
        let lex = Lexicon::new();
        // Oração longa antes da vírgula (7 sílabas > 5); a de depois cabe
        let ls = lines(&lex, "eu caminhava sozinho, vem");
        let report = validate_lyric(&lex, &ls, &tight_profile());
        assert!(report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::OracaoAntesDaVirgula));
        assert!(!report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::OracaoDepoisDaVirgula));
        assert!(!report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::SomaDasOracoes));
    }

    #[test]
    fn test_comma_clause_total_limit() {
        let lex = Lexicon::new();
        // Cada oração cabe no sublimite (5 e 5), mas a soma passa do teto 9
        let ls = lines(&lex, "de amor e de dor, hoje eu vou cantar");
        let report = validate_lyric(&lex, &ls, &tight_profile());
        assert!(report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::SomaDasOracoes && v.measured == 10));
        assert!(!report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::OracaoAntesDaVirgula));
        assert!(!report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::OracaoDepoisDaVirgula));
    }

    #[test]
    fn test_breathability_is_warning_not_violation() {
        let lex = Lexicon::new();
        let ls = lines(&lex, "um dois três quatro cinco seis sete oito");
        let profile = tight_profile();
        let report = validate_lyric(&lex, &ls, &profile);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::ExcessoDePalavras));
    }

    #[test]
    fn test_never_mutates_input() {
        let lex = Lexicon::new();
        let ls = lines(&lex, "eu caminhava sozinho pela estrada do sertão");
        let before = ls.clone();
        let _ = validate_lyric(&lex, &ls, &tight_profile());
        assert_eq!(ls, before);
    }
}
