//! # Perfis de Prosódia por Gênero
//!
//! Configuração numérica que o validador aplica verso a verso: faixa de
//! sílabas, sublimites para versos com vírgula (pausa de respiração) e
//! tetos de "respirabilidade" (palavras/caracteres por linha).
//!
//! O perfil é **entrada do chamador**: o motor o trata como somente
//! leitura, nunca o altera nem persiste. A tabela embutida cobre os
//! gêneros comuns da canção popular; chave desconhecida recebe o perfil
//! padrão documentado — o motor nunca falha por gênero ausente.

use serde::{Deserialize, Serialize};

/// Sublimites aplicados quando o verso contém vírgula: cada oração é
/// contada de forma independente (a vírgula é pausa de respiração, não
/// quebra de linha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommaClauseLimits {
    /// Máximo de sílabas poéticas antes da primeira vírgula.
    pub max_before: usize,
    /// Máximo depois da primeira vírgula.
    pub max_after: usize,
    /// Máximo da soma das duas orações.
    pub total_max: usize,
}

/// Tetos brandos de respirabilidade (geram avisos, não violações).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathLimits {
    pub max_words: usize,
    pub max_chars: usize,
}

/// Perfil numérico de prosódia de um gênero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProsodyProfile {
    /// Chave do gênero ("sertanejo", "pagode", ...).
    pub genre: String,
    pub min_syllables: usize,
    pub max_syllables: usize,
    pub comma_clause: CommaClauseLimits,
    pub breathability: BreathLimits,
}

impl ProsodyProfile {
    /// Perfil padrão documentado, usado para gênero desconhecido:
    /// redondilha com folga (5–12 sílabas), orações de vírgula até 8+8.
    pub fn default_profile() -> Self {
        ProsodyProfile {
            genre: "padrao".to_string(),
            min_syllables: 5,
            max_syllables: 12,
            comma_clause: CommaClauseLimits {
                max_before: 8,
                max_after: 8,
                total_max: 14,
            },
            breathability: BreathLimits {
                max_words: 10,
                max_chars: 48,
            },
        }
    }

    /// Perfil embutido do gênero; chave desconhecida → perfil padrão.
    pub fn for_genre(key: &str) -> Self {
        let make = |genre: &str, min, max, before, after, total, words, chars| ProsodyProfile {
            genre: genre.to_string(),
            min_syllables: min,
            max_syllables: max,
            comma_clause: CommaClauseLimits {
                max_before: before,
                max_after: after,
                total_max: total,
            },
            breathability: BreathLimits {
                max_words: words,
                max_chars: chars,
            },
        };

        match key.trim().to_lowercase().as_str() {
            // Sertanejo: redondilha maior, frase curta e direta
            "sertanejo" => make("sertanejo", 5, 11, 7, 7, 11, 9, 42),
            // Pagode/samba: um pouco mais de folga no verso
            "pagode" | "samba" => make("pagode", 5, 12, 8, 8, 12, 10, 46),
            // MPB: decassílabo clássico com tolerância
            "mpb" => make("mpb", 6, 13, 9, 9, 13, 11, 52),
            // Forró: verso curto e dançante
            "forro" | "forró" => make("forro", 4, 10, 6, 6, 10, 8, 38),
            // Gospel: frases mais longas, respiração ampla
            "gospel" => make("gospel", 6, 14, 9, 9, 14, 12, 56),
            _ => Self::default_profile(),
        }
    }

    /// Lista das chaves de gênero com perfil embutido.
    pub fn known_genres() -> &'static [&'static str] {
        &["sertanejo", "pagode", "samba", "mpb", "forro", "gospel"]
    }
}

impl Default for ProsodyProfile {
    fn default() -> Self {
        Self::default_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_genre() {
        let p = ProsodyProfile::for_genre("sertanejo");
        assert_eq!(p.genre, "sertanejo");
        assert_eq!(p.max_syllables, 11);
    }

    #[test]
    fn test_unknown_genre_falls_back() {
        let p = ProsodyProfile::for_genre("power-metal-nórdico");
        assert_eq!(p, ProsodyProfile::default_profile());
    }

    #[test]
    fn test_key_is_case_insensitive() {
        assert_eq!(ProsodyProfile::for_genre("Sertanejo").genre, "sertanejo");
        assert_eq!(ProsodyProfile::for_genre("forró").genre, "forro");
    }

    #[test]
    fn test_roundtrip_serde() {
        let p = ProsodyProfile::for_genre("mpb");
        let json = serde_json::to_string(&p).unwrap();
        let back: ProsodyProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
