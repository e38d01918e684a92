//! # metrica-core — Motor de Métrica Poética para a Canção Popular
//!
//! Este crate implementa um pipeline completo de análise métrica para letras
//! em Português Brasileiro **como são cantadas**, não como são escritas. Ele
//! foi projetado para ser didático, modular e determinístico: as mesmas
//! entradas produzem sempre as mesmas medições.
//!
//! ## Arquitetura do Sistema
//!
//! O sistema segue uma arquitetura de pipeline linear, onde a letra flui e é
//! transformada passo a passo:
//!
//! 1.  **Entrada**: Letra bruta (String), com diretivas de estrutura
//!     (`[Refrão]`, `(bis)`) preservadas mas nunca contadas.
//! 2.  **Normalização** ([`normalizer`]): classificação de cada linha
//!     (verso, diretiva, branca) e extração das palavras analisáveis.
//! 3.  **Silabação** ([`syllabifier`]): divisão ortográfico-fonética em
//!     sílabas, com ditongos, tritongos, hiatos e o `u` mudo de "que"/"gui".
//! 4.  **Tonicidade** ([`stress`]): localização da sílaba tônica por acento
//!     gráfico, tabela de exceções e regra paroxítona padrão.
//! 5.  **Elisão e Contagem** ([`elision`], [`verse`]): fusões entre palavras
//!     (sinalefa, contração) e a contagem poética — corta-se na última tônica
//!     do verso, como manda a escansão clássica.
//! 6.  **Rima** ([`rhyme`]): classificação dos finais de verso na taxonomia
//!     falsa/toante/pobre/rica/perfeita, com escore 0–100.
//! 7.  **Validação** ([`validator`]): perfis de prosódia por gênero
//!     ([`profile`]) aplicados verso a verso.
//! 8.  **Correção** ([`corrector`]): cadeia de estratégias determinísticas
//!     (dicionário, contração falada, simplificação, reescrita externa,
//!     truncamento) para versos acima do teto.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use metrica_core::{MetricaPipeline, ProsodyProfile};
//!
//! // 1. Instancia o pipeline (carrega o léxico embutido)
//! let pipeline = MetricaPipeline::new();
//!
//! // 2. Letra para análise
//! let lyric = "só me resta esse amor\nque eu não paro de cantar";
//!
//! // 3. Executa a análise com o perfil do gênero
//! let profile = ProsodyProfile::for_genre("sertanejo");
//! let report = pipeline.analyze(lyric, &profile);
//!
//! // 4. Exibe a medição de cada verso
//! for line in &report.per_line {
//!     println!("{} sílabas: {}", line.poetic_count, line.scansion);
//! }
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: orquestrador que conecta todos os estágios e emite eventos.
//! - [`syllabifier`]: o divisor silábico, coração fonético do motor.
//! - [`verse`]: o contador poético — única fonte de verdade da contagem.
//! - [`lexicon`]: tabelas fechadas embutidas (exceções, contrações, classes).

pub mod corrector;
pub mod elision;
pub mod lexicon;
pub mod normalizer;
pub mod pipeline;
pub mod profile;
pub mod rhyme;
pub mod stress;
pub mod syllabifier;
pub mod validator;
pub mod verse;

pub use corrector::{CorrectionOutcome, Corrector, NoRewrite, RewriteError, RewriteService};
pub use lexicon::Lexicon;
pub use pipeline::{LineReport, LyricReport, MetricaPipeline, PipelineEvent};
pub use profile::ProsodyProfile;
pub use rhyme::{RhymeKind, RhymeQuality};
pub use validator::{ValidationReport, Violation, Warning};
pub use verse::{Line, Measure, Word};
