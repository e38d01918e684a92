//! # Silabificador — Divisão Silábica do Português Cantado
//!
//! Divide uma palavra em sílabas gramaticais por classificação de
//! encontros vocálicos: vogais **fortes** (a, e, o) e **fracas** (i, u)
//! formam **ditongos** (forte+fraca ou fraca+forte: "ai", "eu", "ia"),
//! **tritongos** (fraca+forte+fraca: "uai") ou **hiatos** (duas fortes
//! adjacentes, ou vogal fraca acentuada: "po-e-ta", "sa-í").
//!
//! ## Convenções do canto
//!
//! - Ditongos crescentes ("ia", "uo") são fundidos em uma sílaba
//!   (sinérese), como o cantor os executa — "á-gua", não "á-gu-a".
//! - O "u" mudo de "qu"/"gu" diante de e/i não conta como núcleo
//!   ("que" = 1 sílaba, "gui-tar-ra" = 3).
//! - Os nasais "ão", "ãe", "õe" são ditongos ("co-ra-ção").
//!
//! Consoantes nunca formam sílaba sozinhas: encontros consonantais são
//! repartidos deixando no ataque da sílaba seguinte o maior grupo válido
//! (dígrafos ch/lh/nh e grupos consoante+r/l ficam juntos: "pa-la-vra").
//!
//! Entrada vazia → zero sílabas (nunca erro); palavra sem vogal → uma
//! sílaba única, para a contagem não colapsar em texto malformado.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Classificação do encontro vocálico de uma sílaba.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyllableKind {
    /// Núcleo de uma única vogal.
    Simples,
    /// Duas vogais no mesmo núcleo ("ai", "eu", "ão").
    Ditongo,
    /// Três vogais no mesmo núcleo ("uai").
    Tritongo,
    /// Sílaba aberta por quebra de hiato: a vogal inicial é adjacente à
    /// vogal final da sílaba anterior ("po-**e**-ta", "sa-**í**").
    Hiato,
}

/// Uma sílaba: trecho contíguo da palavra com exatamente um núcleo vocálico.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syllable {
    pub text: String,
    pub kind: SyllableKind,
}

/// Vogal portuguesa (incluindo formas acentuadas e nasais)?
pub fn is_vowel(c: char) -> bool {
    matches!(
        c,
        'a' | 'e' | 'i' | 'o' | 'u'
            | 'á' | 'à' | 'â' | 'ã'
            | 'é' | 'ê'
            | 'í'
            | 'ó' | 'ô' | 'õ'
            | 'ú' | 'ü'
    )
}

/// Vogal portadora de acento gráfico (agudo, circunflexo, crase ou til)?
pub fn is_accented_vowel(c: char) -> bool {
    matches!(
        c,
        'á' | 'à' | 'â' | 'ã' | 'é' | 'ê' | 'í' | 'ó' | 'ô' | 'õ' | 'ú'
    )
}

/// Vogal fraca (alta): i, u e suas formas acentuadas.
fn is_weak(c: char) -> bool {
    matches!(c, 'i' | 'í' | 'u' | 'ú' | 'ü')
}

/// Vogal nasal de til, que forma ditongo com e/o seguinte ("ão", "õe").
fn is_nasal_tilde(c: char) -> bool {
    matches!(c, 'ã' | 'õ')
}

/// Dígrafos consonantais inseparáveis.
fn is_digraph(a: char, b: char) -> bool {
    matches!((a, b), ('c', 'h') | ('l', 'h') | ('n', 'h'))
}

/// Grupo consonantal válido como ataque de sílaba (oclusiva/fricativa + r/l).
fn is_onset_cluster(a: char, b: char) -> bool {
    matches!(b, 'r' | 'l') && matches!(a, 'b' | 'c' | 'd' | 'f' | 'g' | 'p' | 't' | 'v')
}

/// O "u" em `chars[i]` é mudo (qu/gu diante de e/i)?
fn is_silent_u(chars: &[char], i: usize) -> bool {
    if chars[i] != 'u' && chars[i] != 'ü' {
        return false;
    }
    let prev_qg = i > 0 && matches!(chars[i - 1], 'q' | 'g');
    let next_ei = chars
        .get(i + 1)
        .map(|c| matches!(c, 'e' | 'é' | 'ê' | 'i' | 'í'))
        .unwrap_or(false);
    // "ü" do trema histórico (lingüiça) é sempre pronunciado
    prev_qg && next_ei && chars[i] != 'ü'
}

/// Pode a vogal `next` juntar-se ao núcleo `nucleus` já acumulado?
fn can_merge(nucleus: &[char], next: char) -> bool {
    match nucleus.len() {
        1 => {
            let first = nucleus[0];
            // Ditongos nasais: ão, ãe, õe
            if is_nasal_tilde(first) && matches!(next, 'e' | 'o') {
                return true;
            }
            // Vogal fraca acentuada é sempre núcleo próprio: sa-í, ba-ú
            if is_weak(next) && is_accented_vowel(next) {
                return false;
            }
            if !is_weak(first) && !is_weak(next) {
                // Duas fortes → hiato: po-e-ta, vo-o
                return false;
            }
            if is_weak(first) && is_weak(next) {
                // iu/ui são ditongos; repetição (uu) é hiato
                return first != next;
            }
            true
        }
        // Tritongo: fraca + forte já no núcleo, fecha com outra fraca
        2 => is_weak(nucleus[0]) && !is_weak(nucleus[1]) && is_weak(next) && !is_accented_vowel(next),
        _ => false,
    }
}

/// Divide uma palavra normalizada (minúscula) em sílabas.
///
/// Garantias: entrada vazia → vetor vazio; palavra não-vazia → pelo menos
/// uma sílaba; cada sílaba contém exatamente um núcleo vocálico (ou a
/// palavra inteira, se não houver vogal alguma).
pub fn syllabify(word: &str) -> Vec<Syllable> {
    // Graphemes evitam surpresas com marcas combinantes coladas à vogal
    let chars: Vec<char> = word
        .graphemes(true)
        .filter_map(|g| g.chars().next())
        .collect();
    if chars.is_empty() {
        return vec![];
    }

    // Núcleos vocálicos: (início, fim exclusivo, abre hiato?)
    let mut nuclei: Vec<(usize, usize, bool)> = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if is_vowel(c) && !is_silent_u(&chars, i) {
            let extend = nuclei
                .last()
                .map(|&(start, end, _)| {
                    end == i && can_merge(&chars[start..end], c)
                })
                .unwrap_or(false);
            if extend {
                if let Some(last) = nuclei.last_mut() {
                    last.1 = i + 1;
                }
            } else {
                // Hiato: a vogal anterior imediata pertence a outro núcleo
                let hiatus = nuclei.last().map(|&(_, end, _)| end == i).unwrap_or(false);
                nuclei.push((i, i + 1, hiatus));
            }
        }
        i += 1;
    }

    if nuclei.is_empty() {
        // Sem vogal: a palavra inteira vale uma unidade
        return vec![Syllable {
            text: chars.iter().collect(),
            kind: SyllableKind::Simples,
        }];
    }

    // Fronteiras silábicas: reparte as consoantes entre núcleos deixando
    // o maior ataque válido para a sílaba seguinte
    let mut boundaries = vec![0usize];
    for k in 1..nuclei.len() {
        let run_start = nuclei[k - 1].1;
        let run_end = nuclei[k].0;
        let run_len = run_end - run_start;
        let onset = if run_len == 0 {
            0
        } else if run_len >= 2 && is_silent_u(&chars, run_end - 1) {
            // qu/gu mudo fica inteiro no ataque: a-que-le
            2
        } else if run_len >= 2
            && (is_digraph(chars[run_end - 2], chars[run_end - 1])
                || is_onset_cluster(chars[run_end - 2], chars[run_end - 1]))
        {
            2
        } else {
            1
        };
        boundaries.push(run_end - onset);
    }
    boundaries.push(chars.len());

    nuclei
        .iter()
        .enumerate()
        .map(|(k, &(n_start, n_end, hiatus))| {
            let kind = if hiatus {
                SyllableKind::Hiato
            } else {
                match n_end - n_start {
                    1 => SyllableKind::Simples,
                    2 => SyllableKind::Ditongo,
                    _ => SyllableKind::Tritongo,
                }
            };
            Syllable {
                text: chars[boundaries[k]..boundaries[k + 1]].iter().collect(),
                kind,
            }
        })
        .collect()
}

/// Número de sílabas gramaticais da palavra (atalho sobre [`syllabify`]).
pub fn syllable_count(word: &str) -> usize {
    syllabify(word).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(word: &str) -> Vec<String> {
        syllabify(word).into_iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_empty_word() {
        assert!(syllabify("").is_empty());
        assert_eq!(syllable_count(""), 0);
    }

    #[test]
    fn test_agua_diphthong() {
        // "u"+"a" formam ditongo crescente: á-gua
        assert_eq!(texts("água"), vec!["á", "gua"]);
        let syls = syllabify("água");
        assert_eq!(syls[1].kind, SyllableKind::Ditongo);
    }

    #[test]
    fn test_falling_diphthongs() {
        assert_eq!(texts("saudade"), vec!["sau", "da", "de"]);
        assert_eq!(texts("fui"), vec!["fui"]);
        assert_eq!(texts("partiu"), vec!["par", "tiu"]);
    }

    #[test]
    fn test_hiatus_two_strong() {
        let syls = syllabify("poeta");
        assert_eq!(
            syls.iter().map(|s| s.text.as_str()).collect::<Vec<_>>(),
            vec!["po", "e", "ta"]
        );
        assert_eq!(syls[1].kind, SyllableKind::Hiato);
    }

    #[test]
    fn test_hiatus_accented_weak() {
        // Vogal fraca acentuada quebra o ditongo: sa-í, ba-ú
        assert_eq!(texts("saí"), vec!["sa", "í"]);
        assert_eq!(texts("baú"), vec!["ba", "ú"]);
    }

    #[test]
    fn test_nasal_diphthongs() {
        assert_eq!(texts("coração"), vec!["co", "ra", "ção"]);
        assert_eq!(texts("razão"), vec!["ra", "zão"]);
        let syls = syllabify("razão");
        assert_eq!(syls[1].kind, SyllableKind::Ditongo);
    }

    #[test]
    fn test_triphthong() {
        assert_eq!(texts("uruguai"), vec!["u", "ru", "guai"]);
        let syls = syllabify("uruguai");
        assert_eq!(syls[2].kind, SyllableKind::Tritongo);
    }

    #[test]
    fn test_silent_u() {
        assert_eq!(texts("que"), vec!["que"]);
        assert_eq!(texts("guitarra"), vec!["gui", "tar", "ra"]);
        assert_eq!(texts("aquele"), vec!["a", "que", "le"]);
    }

    #[test]
    fn test_consonant_splitting() {
        // rr/ss repartem; grupos C+r/l e dígrafos ficam no ataque
        assert_eq!(texts("carro"), vec!["car", "ro"]);
        assert_eq!(texts("palavra"), vec!["pa", "la", "vra"]);
        assert_eq!(texts("chuva"), vec!["chu", "va"]);
        assert_eq!(texts("cantar"), vec!["can", "tar"]);
    }

    #[test]
    fn test_no_vowel_counts_one() {
        // Entrada malformada não colapsa a contagem para zero
        assert_eq!(syllable_count("pssst"), 1);
    }

    #[test]
    fn test_apostrophe_contraction() {
        assert_eq!(texts("d'amor"), vec!["d'a", "mor"]);
    }

    #[test]
    fn test_single_nucleus_invariant() {
        for word in ["saudade", "coração", "guitarra", "uruguai", "poesia"] {
            for syl in syllabify(word) {
                let nuclei: Vec<char> =
                    syl.text.chars().filter(|&c| is_vowel(c)).collect();
                assert!(!nuclei.is_empty(), "sílaba sem núcleo em {word}: {}", syl.text);
            }
        }
    }
}
