//! # Corretor de Restrição Métrica
//!
//! Máquina de estados que recebe um verso violador e um teto de sílabas
//! e aplica uma cadeia **ordenada** de estratégias de reescrita, da mais
//! barata e preservadora de sentido à mais destrutiva:
//!
//! 1. **Dicionário** — substituições de frase pré-validadas.
//! 2. **Contração** — "para"→"pra", "você"→"cê", "está"→"tá".
//! 3. **Simplificação semântica** — sinônimos mais curtos e remoção de
//!    artigos/possessivos, com guardas: nunca menos de 3 palavras, nunca
//!    verso terminado em palavra funcional pendurada.
//! 4. **Reescrita externa** — delega ao serviço colaborador
//!    ([`RewriteService`]); a resposta NÃO é confiada: é remedida pelo
//!    contador poético como qualquer outro candidato.
//! 5. **Truncamento** — remove palavras do fim, uma a uma (nunca parte
//!    palavra, nunca toca a primeira), e marca o resultado como degradado.
//!
//! Após **cada** mutação a contagem poética é recalculada pelo contador
//! único ([`crate::verse::measure_line`]); nada de contagem paralela.
//! O total de tentativas é limitado; no esgotamento devolve o melhor
//! candidato visto com `success = false` — nunca o verso original
//! silenciosamente apresentado como corrigido. O corretor não guarda
//! estado entre versos.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lexicon::Lexicon;
use crate::normalizer::strip_diacritics;
use crate::verse::poetic_count_of;

/// Falhas do serviço externo de reescrita. Nenhuma delas é fatal para o
/// corretor: qualquer erro vira "estratégia sem melhoria" e a máquina
/// avança.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("tempo de resposta do serviço de reescrita esgotado")]
    Timeout,
    #[error("serviço de reescrita indisponível")]
    Unavailable,
    #[error("pedido recusado pelo serviço: {0}")]
    Rejected(String),
}

/// Colaborador externo de reescrita (modelo de texto hospedado).
///
/// Interface estreita e substituível: em testes, um stub determinístico;
/// em produção, o cliente do modelo com timeout explícito embutido na
/// implementação. O corretor nunca reenta ou retenta esta chamada por
/// conta própria — ela consome uma tentativa do orçamento como qualquer
/// estratégia.
pub trait RewriteService: Send + Sync {
    fn rewrite(
        &self,
        line: &str,
        genre: &str,
        ceiling: usize,
        hint: &str,
    ) -> Result<String, RewriteError>;
}

/// Serviço nulo: sempre indisponível. Útil quando o chamador não quer
/// nenhuma chamada externa (a cadeia local continua funcionando).
pub struct NoRewrite;

impl RewriteService for NoRewrite {
    fn rewrite(&self, _: &str, _: &str, _: usize, _: &str) -> Result<String, RewriteError> {
        Err(RewriteError::Unavailable)
    }
}

/// Registro de uma tentativa: estratégia, entrada, saída e contagem
/// resultante.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionAttempt {
    pub strategy: String,
    pub input: String,
    pub output: String,
    pub poetic_count: usize,
}

/// Resultado final da correção de um verso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionOutcome {
    pub original: String,
    pub final_text: String,
    pub final_count: usize,
    /// `true` somente se `final_count ≤ teto`.
    pub success: bool,
    /// `true` quando o resultado veio do truncamento (última instância).
    pub degraded: bool,
    pub attempts: Vec<CorrectionAttempt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Dicionario,
    Contracao,
    Simplificacao,
    ReescritaExterna,
    Truncamento,
}

impl Strategy {
    const CHAIN: [Strategy; 5] = [
        Strategy::Dicionario,
        Strategy::Contracao,
        Strategy::Simplificacao,
        Strategy::ReescritaExterna,
        Strategy::Truncamento,
    ];

    fn name(&self) -> &'static str {
        match self {
            Strategy::Dicionario => "dicionario",
            Strategy::Contracao => "contracao",
            Strategy::Simplificacao => "simplificacao",
            Strategy::ReescritaExterna => "reescrita_externa",
            Strategy::Truncamento => "truncamento",
        }
    }
}

/// O corretor propriamente dito: léxico injetado por referência e
/// orçamento fixo de tentativas (padrão: 5, uma por estratégia).
pub struct Corrector<'a> {
    lex: &'a Lexicon,
    max_attempts: usize,
    /// Padrões `(?i)` pré-compilados do dicionário de correção, na ordem
    /// de prioridade da tabela (frases mais longas primeiro).
    dictionary_patterns: Vec<(Regex, String)>,
}

fn compile_dictionary(lex: &Lexicon) -> Vec<(Regex, String)> {
    lex.dictionary_fixes()
        .iter()
        .filter_map(|(from, to)| {
            Regex::new(&format!("(?i){}", regex::escape(from)))
                .ok()
                .map(|re| (re, to.clone()))
        })
        .collect()
}

/// Reaplica a caixa do trecho casado: substituição em início de verso
/// capitalizado mantém a inicial maiúscula.
fn match_case(replacement: &str, matched: &str) -> String {
    let upper_initial = matched
        .chars()
        .next()
        .map(char::is_uppercase)
        .unwrap_or(false);
    if !upper_initial {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl<'a> Corrector<'a> {
    pub fn new(lex: &'a Lexicon) -> Self {
        Self {
            lex,
            max_attempts: 5,
            dictionary_patterns: compile_dictionary(lex),
        }
    }

    pub fn with_max_attempts(lex: &'a Lexicon, max_attempts: usize) -> Self {
        Self {
            lex,
            max_attempts: max_attempts.max(1),
            dictionary_patterns: compile_dictionary(lex),
        }
    }

    /// Corrige um verso para caber em `ceiling` sílabas poéticas.
    ///
    /// Teto 0 é tratado como 1 (nenhum verso escande a zero). Termina
    /// sempre dentro do orçamento de tentativas; nunca devolve verso com
    /// palavra partida.
    pub fn correct(
        &self,
        raw_line: &str,
        ceiling: usize,
        genre: &str,
        rewrite: &dyn RewriteService,
    ) -> CorrectionOutcome {
        let ceiling = ceiling.max(1);
        let original = raw_line.trim().to_string();
        let mut current = original.clone();
        let mut current_count = poetic_count_of(self.lex, &current);

        if current_count <= ceiling {
            return CorrectionOutcome {
                final_text: current.clone(),
                final_count: current_count,
                success: true,
                degraded: false,
                attempts: vec![],
                original,
            };
        }

        let mut attempts: Vec<CorrectionAttempt> = Vec::new();
        // Melhor candidato visto: (texto, contagem, veio de truncamento?)
        let mut best: Option<(String, usize, bool)> = None;

        for strategy in Strategy::CHAIN {
            if attempts.len() >= self.max_attempts {
                break;
            }
            let candidate = match self.apply(strategy, &current, ceiling, genre, rewrite) {
                Some(c) if c != current => c,
                _ => continue,
            };
            let count = poetic_count_of(self.lex, &candidate);
            attempts.push(CorrectionAttempt {
                strategy: strategy.name().to_string(),
                input: current.clone(),
                output: candidate.clone(),
                poetic_count: count,
            });

            let is_trunc = strategy == Strategy::Truncamento;
            if best.as_ref().map(|(_, c, _)| count < *c).unwrap_or(true) {
                best = Some((candidate.clone(), count, is_trunc));
            }

            if count <= ceiling {
                return CorrectionOutcome {
                    original,
                    final_text: candidate,
                    final_count: count,
                    success: true,
                    degraded: is_trunc,
                    attempts,
                };
            }
            if count < current_count {
                current = candidate;
                current_count = count;
            }
        }

        // Orçamento esgotado: devolve o candidato de menor excesso, nunca
        // o original rotulado como corrigido
        match best {
            Some((text, count, degraded)) => CorrectionOutcome {
                original,
                final_text: text,
                final_count: count,
                success: false,
                degraded,
                attempts,
            },
            None => CorrectionOutcome {
                final_text: original.clone(),
                final_count: current_count,
                success: false,
                degraded: false,
                attempts,
                original,
            },
        }
    }

    fn apply(
        &self,
        strategy: Strategy,
        current: &str,
        ceiling: usize,
        genre: &str,
        rewrite: &dyn RewriteService,
    ) -> Option<String> {
        match strategy {
            Strategy::Dicionario => self.apply_dictionary(current),
            Strategy::Contracao => self.apply_contractions(current),
            Strategy::Simplificacao => self.apply_simplification(current),
            Strategy::ReescritaExterna => self.apply_external(current, ceiling, genre, rewrite),
            Strategy::Truncamento => self.apply_truncation(current, ceiling),
        }
    }

    /// Estratégia 1: primeira frase do dicionário de correção presente no
    /// verso, substituída uma vez. O casamento é sem caixa, com fronteiras
    /// em bytes do próprio texto original: offsets de uma cópia minúscula
    /// divergem quando a minúscula muda o comprimento do caractere.
    fn apply_dictionary(&self, current: &str) -> Option<String> {
        for (pattern, to) in &self.dictionary_patterns {
            if let Some(m) = pattern.find(current) {
                let mut out = String::with_capacity(current.len());
                out.push_str(&current[..m.start()]);
                out.push_str(&match_case(to, m.as_str()));
                out.push_str(&current[m.end()..]);
                return Some(out);
            }
        }
        None
    }

    /// Estratégia 2: contrações faladas palavra a palavra, todas de uma
    /// vez ("para"→"pra", "está"→"tá"). Pontuação colada é preservada.
    fn apply_contractions(&self, current: &str) -> Option<String> {
        let mut changed = false;
        let replaced: Vec<String> = current
            .split_whitespace()
            .map(|token| {
                let core = token
                    .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-');
                let lower = core.to_lowercase();
                for (from, to) in self.lex.spoken_contractions() {
                    if &lower == from {
                        changed = true;
                        return token.replacen(core, to, 1);
                    }
                }
                token.to_string()
            })
            .collect();
        changed.then(|| replaced.join(" "))
    }

    /// Estratégia 3: sinônimo mais curto ou remoção de artigo/possessivo.
    /// Guardas: resultado com ≥ 3 palavras e sem palavra funcional
    /// pendurada no fim do verso.
    fn apply_simplification(&self, current: &str) -> Option<String> {
        let candidate = self
            .apply_synonyms(current)
            .or_else(|| self.drop_article(current))?;
        let words: Vec<&str> = candidate.split_whitespace().collect();
        if words.len() < 3 {
            return None;
        }
        let last = words.last()?.to_lowercase();
        let last = last.trim_matches(|c: char| !c.is_alphanumeric());
        if self.lex.is_function_word(&strip_diacritics(last)) {
            return None;
        }
        Some(candidate)
    }

    fn apply_synonyms(&self, current: &str) -> Option<String> {
        let mut changed = false;
        let replaced: Vec<String> = current
            .split_whitespace()
            .map(|token| {
                let core = token.trim_matches(|c: char| !c.is_alphanumeric());
                let lower = core.to_lowercase();
                for (from, to) in self.lex.shorter_synonyms() {
                    if &lower == from && !changed {
                        changed = true;
                        return token.replacen(core, to, 1);
                    }
                }
                token.to_string()
            })
            .collect();
        changed.then(|| replaced.join(" "))
    }

    /// Artigos e possessivos removíveis sem perda de sentido cantado.
    fn drop_article(&self, current: &str) -> Option<String> {
        const DROPPABLE: &[&str] = &[
            "o", "a", "os", "as", "um", "uma", "meu", "minha", "teu", "tua", "seu", "sua",
        ];
        let tokens: Vec<&str> = current.split_whitespace().collect();
        // A primeira palavra do verso nunca é tocada
        let drop_at = tokens
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, t)| DROPPABLE.contains(&t.to_lowercase().as_str()))
            .map(|(i, _)| i)?;
        let remaining: Vec<&str> = tokens
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != drop_at)
            .map(|(_, t)| *t)
            .collect();
        Some(remaining.join(" "))
    }

    /// Estratégia 4: o colaborador externo. A resposta é tratada como NÃO
    /// confiável — vazia, idêntica ou com erro, vira `None` e a máquina
    /// avança; válida, é remedida como qualquer candidato.
    fn apply_external(
        &self,
        current: &str,
        ceiling: usize,
        genre: &str,
        rewrite: &dyn RewriteService,
    ) -> Option<String> {
        let hint = "reescreva o verso mais curto, mantendo o sentido e o tom do gênero";
        match rewrite.rewrite(current, genre, ceiling, hint) {
            Ok(text) => {
                let text = text.trim().to_string();
                (!text.is_empty() && text != current).then_some(text)
            }
            Err(_) => None,
        }
    }

    /// Estratégia 5 (última instância): remove palavras do fim até caber
    /// no teto ou restar uma só. Nunca parte palavra, nunca remove a
    /// primeira.
    fn apply_truncation(&self, current: &str, ceiling: usize) -> Option<String> {
        let mut words: Vec<&str> = current.split_whitespace().collect();
        if words.len() <= 1 {
            return None;
        }
        while words.len() > 1 {
            words.pop();
            let candidate = words.join(" ");
            if poetic_count_of(self.lex, &candidate) <= ceiling {
                return Some(candidate);
            }
        }
        Some(words.join(" "))
    }
}
