//! # Pipeline de Métrica — Orquestrador com Eventos Observáveis
//!
//! Coordena todos os módulos (normalizador, silabificador, tonicidade,
//! elisão, contador, rima, validador, corretor) e produz o relatório
//! completo que a aplicação ao redor consome. No modo streaming, emite
//! eventos em cada passo via canal Rust (`mpsc`), permitindo que o
//! servidor WebSocket transmita a escansão em tempo real para o cliente.
//!
//! Os componentes fonéticos são puros e sem estado compartilhado: a
//! medição de uma letra inteira é distribuída entre threads com `rayon`
//! e remontada pelo índice original das linhas.

use std::sync::mpsc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corrector::{CorrectionAttempt, CorrectionOutcome, Corrector, RewriteService};
use crate::elision::ElisionEvent;
use crate::lexicon::Lexicon;
use crate::normalizer::LineRole;
use crate::profile::ProsodyProfile;
use crate::rhyme::{classify_lines, RhymeQuality};
use crate::validator::{validate_lyric, Violation, Warning};
use crate::verse::{analyze_line, measure_line, scansion, Line};

/// Medição de uma linha no relatório final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineReport {
    pub index: usize,
    /// Texto de exibição, fiel ao original.
    pub text: String,
    pub role: LineRole,
    pub poetic_count: usize,
    pub raw_count: usize,
    /// Posição acumulada (base 1) da última tônica do verso.
    pub stress_offset: usize,
    /// Escansão legível: "de‿a-mor e de dor".
    pub scansion: String,
    pub elisions: Vec<ElisionEvent>,
}

/// Par de versos classificado quanto à rima.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhymePairReport {
    pub first_line: usize,
    pub second_line: usize,
    pub quality: RhymeQuality,
}

/// Resultado da correção de um verso violador.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionReport {
    pub line_index: usize,
    pub outcome: CorrectionOutcome,
}

/// O relatório completo de uma letra: a ÚNICA superfície de dados que a
/// aplicação ao redor (formulários web, widgets) pode consumir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricReport {
    pub per_line: Vec<LineReport>,
    pub violations: Vec<Violation>,
    pub warnings: Vec<Warning>,
    pub rhyme_pairs: Vec<RhymePairReport>,
    pub corrections: Vec<CorrectionReport>,
    pub processing_ms: u64,
}

/// Eventos emitidos pelo pipeline no modo streaming.
///
/// Permitem que a interface visualize a escansão passo a passo: cada
/// variante carrega os dados de uma etapa.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// Uma linha foi medida pelo contador poético.
    LineMeasured {
        index: usize,
        text: String,
        poetic_count: usize,
        stress_offset: usize,
        scansion: String,
    },
    /// Uma elisão foi detectada dentro da linha.
    ElisionDetected {
        line_index: usize,
        event: ElisionEvent,
    },
    /// O validador encontrou uma violação rígida.
    ViolationFound { violation: Violation },
    /// Um par de finais de verso foi classificado.
    RhymeClassified { pair: RhymePairReport },
    /// O corretor registrou uma tentativa em um verso violador.
    CorrectionTried {
        line_index: usize,
        attempt: CorrectionAttempt,
    },
    /// O processo terminou; relatório completo consolidado.
    Done {
        report: LyricReport,
        processing_ms: u64,
    },
}

/// O pipeline principal: léxico imutável carregado uma vez e
/// compartilhado por referência com todos os componentes.
pub struct MetricaPipeline {
    pub lexicon: Lexicon,
}

impl MetricaPipeline {
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::new(),
        }
    }

    /// Analisa a letra inteira: medição (em paralelo), validação e rimas.
    /// Não aplica correção — veja [`MetricaPipeline::analyze_and_correct`].
    pub fn analyze(&self, text: &str, profile: &ProsodyProfile) -> LyricReport {
        let start = std::time::Instant::now();
        let lines = self.parse_lines(text);

        // Medição independente por linha, remontada pelo índice original
        let per_line: Vec<LineReport> = lines
            .par_iter()
            .enumerate()
            .map(|(index, line)| self.line_report(index, line))
            .collect();

        let validation = validate_lyric(&self.lexicon, &lines, profile);
        let rhyme_pairs = self.rhyme_pairs(&lines);

        LyricReport {
            per_line,
            violations: validation.violations,
            warnings: validation.warnings,
            rhyme_pairs,
            corrections: vec![],
            processing_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Analisa e, para cada verso acima do teto do perfil, roda o
    /// corretor. Versos são corrigidos de forma independente; uma letra
    /// parcialmente corrigida volta com o `success` de cada verso.
    pub fn analyze_and_correct(
        &self,
        text: &str,
        profile: &ProsodyProfile,
        rewrite: &dyn RewriteService,
    ) -> LyricReport {
        let start = std::time::Instant::now();
        let mut report = self.analyze(text, profile);
        let corrector = Corrector::new(&self.lexicon);

        let mut too_long: Vec<usize> = report
            .violations
            .iter()
            .filter(|v| v.kind == crate::validator::ViolationKind::VersoLongo)
            .map(|v| v.line_index)
            .collect();
        too_long.sort_unstable();
        too_long.dedup();

        report.corrections = too_long
            .into_iter()
            .filter_map(|line_index| {
                let line = report.per_line.get(line_index)?;
                let outcome = corrector.correct(
                    &line.text,
                    profile.max_syllables,
                    &profile.genre,
                    rewrite,
                );
                Some(CorrectionReport {
                    line_index,
                    outcome,
                })
            })
            .collect();

        report.processing_ms = start.elapsed().as_millis() as u64;
        report
    }

    /// Executa a análise emitindo eventos de progresso em tempo real.
    ///
    /// Sequencial por definição (a ordem dos eventos é a da letra). O
    /// último evento é sempre [`PipelineEvent::Done`] com o relatório
    /// consolidado.
    pub fn analyze_streaming(
        &self,
        text: &str,
        profile: &ProsodyProfile,
        tx: mpsc::Sender<PipelineEvent>,
    ) {
        let start = std::time::Instant::now();
        let lines = self.parse_lines(text);

        let mut per_line = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            let lr = self.line_report(index, line);
            let _ = tx.send(PipelineEvent::LineMeasured {
                index,
                text: lr.text.clone(),
                poetic_count: lr.poetic_count,
                stress_offset: lr.stress_offset,
                scansion: lr.scansion.clone(),
            });
            for event in &lr.elisions {
                let _ = tx.send(PipelineEvent::ElisionDetected {
                    line_index: index,
                    event: event.clone(),
                });
            }
            per_line.push(lr);
        }

        let validation = validate_lyric(&self.lexicon, &lines, profile);
        for violation in &validation.violations {
            let _ = tx.send(PipelineEvent::ViolationFound {
                violation: violation.clone(),
            });
        }

        let rhyme_pairs = self.rhyme_pairs(&lines);
        for pair in &rhyme_pairs {
            let _ = tx.send(PipelineEvent::RhymeClassified { pair: pair.clone() });
        }

        let processing_ms = start.elapsed().as_millis() as u64;
        let report = LyricReport {
            per_line,
            violations: validation.violations,
            warnings: validation.warnings,
            rhyme_pairs,
            corrections: vec![],
            processing_ms,
        };
        let _ = tx.send(PipelineEvent::Done {
            report,
            processing_ms,
        });
    }

    fn parse_lines(&self, text: &str) -> Vec<Line> {
        text.lines()
            .map(|raw| analyze_line(&self.lexicon, raw))
            .collect()
    }

    fn line_report(&self, index: usize, line: &Line) -> LineReport {
        let measure = measure_line(&self.lexicon, line);
        LineReport {
            index,
            text: line.display_text.clone(),
            role: line.role,
            poetic_count: measure.poetic_count,
            raw_count: measure.raw_count,
            stress_offset: measure.stress_offset,
            scansion: scansion(&self.lexicon, line),
            elisions: measure.elisions,
        }
    }

    /// Pares de rima: versos contáveis consecutivos dentro da mesma
    /// estrofe (linha em branco encerra a estrofe; diretivas são
    /// transparentes).
    fn rhyme_pairs(&self, lines: &[Line]) -> Vec<RhymePairReport> {
        let mut pairs = Vec::new();
        let mut prev: Option<usize> = None;
        for (index, line) in lines.iter().enumerate() {
            match line.role {
                LineRole::Blank => prev = None,
                LineRole::Directive => {}
                LineRole::Lyric => {
                    if !line.is_countable() {
                        continue;
                    }
                    if let Some(p) = prev {
                        if let Some(quality) = classify_lines(&self.lexicon, &lines[p], line) {
                            pairs.push(RhymePairReport {
                                first_line: p,
                                second_line: index,
                                quality,
                            });
                        }
                    }
                    prev = Some(index);
                }
            }
        }
        pairs
    }
}

impl Default for MetricaPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corrector::NoRewrite;
    use crate::rhyme::RhymeKind;

    const LYRIC: &str = "\
[Verso 1]
só me resta esse amor
que eu não paro de cantar

[Refrão]
coração sem razão
(bis)";

    #[test]
    fn test_analyze_full_lyric() {
        let pipeline = MetricaPipeline::new();
        let profile = ProsodyProfile::for_genre("sertanejo");
        let report = pipeline.analyze(LYRIC, &profile);

        assert_eq!(report.per_line.len(), 7);
        // Diretivas preservadas com contagem zero
        assert_eq!(report.per_line[0].role, LineRole::Directive);
        assert_eq!(report.per_line[0].poetic_count, 0);
        assert_eq!(report.per_line[0].text, "[Verso 1]");
        // Índices remontados na ordem original
        for (i, lr) in report.per_line.iter().enumerate() {
            assert_eq!(lr.index, i);
        }
        assert!(report.corrections.is_empty());
    }

    #[test]
    fn test_rhyme_pairs_respect_stanzas() {
        let pipeline = MetricaPipeline::new();
        let profile = ProsodyProfile::default_profile();
        let report = pipeline.analyze(LYRIC, &profile);

        // Um único par: linhas 1–2; a linha em branco encerra a estrofe
        assert_eq!(report.rhyme_pairs.len(), 1);
        assert_eq!(report.rhyme_pairs[0].first_line, 1);
        assert_eq!(report.rhyme_pairs[0].second_line, 2);
        assert_eq!(report.rhyme_pairs[0].quality.kind, RhymeKind::Rica);
    }

    #[test]
    fn test_analyze_and_correct_too_long_line() {
        let pipeline = MetricaPipeline::new();
        let profile = ProsodyProfile::for_genre("forro");
        let text = "dentro do meu coração mora a saudade de você";
        let report = pipeline.analyze_and_correct(text, &profile, &NoRewrite);

        assert_eq!(report.corrections.len(), 1);
        let correction = &report.corrections[0];
        assert_eq!(correction.line_index, 0);
        assert!(correction.outcome.success, "{:?}", correction.outcome);
        assert!(correction.outcome.final_count <= profile.max_syllables);
        assert!(!correction.outcome.attempts.is_empty());
    }

    #[test]
    fn test_streaming_event_order() {
        let pipeline = MetricaPipeline::new();
        let profile = ProsodyProfile::default_profile();
        let (tx, rx) = mpsc::channel();
        pipeline.analyze_streaming(LYRIC, &profile, tx);

        let events: Vec<PipelineEvent> = rx.try_iter().collect();
        assert!(!events.is_empty());
        assert!(
            matches!(&events[0], PipelineEvent::LineMeasured { .. }),
            "primeiro evento deve ser LineMeasured"
        );
        assert!(
            matches!(events.last().unwrap(), PipelineEvent::Done { .. }),
            "último evento deve ser Done"
        );
    }

    #[test]
    fn test_streaming_report_matches_sync() {
        let pipeline = MetricaPipeline::new();
        let profile = ProsodyProfile::default_profile();
        let sync_report = pipeline.analyze(LYRIC, &profile);

        let (tx, rx) = mpsc::channel();
        pipeline.analyze_streaming(LYRIC, &profile, tx);
        let streamed = rx
            .try_iter()
            .find_map(|e| match e {
                PipelineEvent::Done { report, .. } => Some(report),
                _ => None,
            })
            .unwrap();

        assert_eq!(sync_report.per_line.len(), streamed.per_line.len());
        for (a, b) in sync_report.per_line.iter().zip(streamed.per_line.iter()) {
            assert_eq!(a.poetic_count, b.poetic_count);
            assert_eq!(a.scansion, b.scansion);
        }
        assert_eq!(sync_report.violations, streamed.violations);
    }

    #[test]
    fn test_empty_lyric() {
        let pipeline = MetricaPipeline::new();
        let profile = ProsodyProfile::default_profile();
        let report = pipeline.analyze("", &profile);
        assert!(report.per_line.is_empty());
        assert!(report.violations.is_empty());
        assert!(report.rhyme_pairs.is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let pipeline = MetricaPipeline::new();
        let profile = ProsodyProfile::for_genre("mpb");
        let report = pipeline.analyze(LYRIC, &profile);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("per_line"));
        assert!(json.contains("rhyme_pairs"));
    }
}
