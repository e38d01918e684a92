//! # Léxico — Tabelas Fechadas do Português Cantado
//!
//! Reúne todo o conhecimento lexical que o motor de métrica consome:
//! exceções de tonicidade, contrações consagradas na canção popular,
//! substituições de frase pré-validadas, palavras funcionais e as listas
//! de substantivos concretos/abstratos usadas pela classificação de rima.
//!
//! ## Por que tabelas fechadas?
//!
//! O motor não faz análise linguística geral: ele cobre o vocabulário
//! recorrente da canção popular brasileira com listas pequenas e auditáveis.
//! As tabelas são compiladas uma única vez em um [`Lexicon`] imutável e
//! compartilhadas por referência entre todos os componentes — nenhum
//! componente as altera em tempo de execução.

use std::collections::{HashMap, HashSet};

use crate::stress::StressClass;

/// Classe gramatical simplificada usada pela classificação de rima.
///
/// Não é um POS-tagger: cobre apenas as classes necessárias para
/// distinguir "rima rica" (classes diferentes) de "rima pobre" (mesma
/// classe), resolvidas por léxico fechado e heurísticas de sufixo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GramClass {
    /// Substantivo: "amor", "estrada", "coração"
    Substantivo,
    /// Verbo (tipicamente infinitivo em posição de rima): "cantar", "sofrer"
    Verbo,
    /// Adjetivo: "sozinho", "perdida"
    Adjetivo,
    /// Advérbio: "devagar", "lentamente"
    Adverbio,
}

/// Bucket de concretude de um substantivo, para o contraste
/// concreto/abstrato da rima rica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concreteness {
    Concreto,
    Abstrato,
}

/// Exceções de tonicidade para palavras escritas SEM acento gráfico.
///
/// Letra de música digitada por usuário frequentemente omite acentos
/// ("musica", "coraçao" → "coracao"). A chave é a forma minúscula com
/// diacríticos removidos; o valor é a classe tônica correta.
const STRESS_EXCEPTIONS: &[(&str, StressClass)] = &[
    // Proparoxítonas que perderiam o acento na digitação informal
    ("musica", StressClass::Proparoxitona),
    ("ultimo", StressClass::Proparoxitona),
    ("ultima", StressClass::Proparoxitona),
    ("lagrima", StressClass::Proparoxitona),
    ("numero", StressClass::Proparoxitona),
    ("passaro", StressClass::Proparoxitona),
    ("unico", StressClass::Proparoxitona),
    ("proximo", StressClass::Proparoxitona),
    // Oxítonas sem acento que a regra padrão erraria
    ("amor", StressClass::Oxitona),
    ("calor", StressClass::Oxitona),
    ("coracao", StressClass::Oxitona),
    ("razao", StressClass::Oxitona),
    ("paixao", StressClass::Oxitona),
    ("cancao", StressClass::Oxitona),
    ("violao", StressClass::Oxitona),
    ("sertao", StressClass::Oxitona),
    ("alguem", StressClass::Oxitona),
    ("ninguem", StressClass::Oxitona),
    ("voce", StressClass::Oxitona),
    ("cafe", StressClass::Oxitona),
    ("ate", StressClass::Oxitona),
];

/// Contrações lexicalizadas do canto popular: o par `(esquerda, direita)`
/// funde-se em uma sílaba a menos, independente da regra geral de sinalefa.
/// `direita = "*"` casa com qualquer palavra iniciada em vogal.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("de", "*"),
    ("que", "eu"),
    ("que", "ele"),
    ("que", "ela"),
    ("se", "eu"),
    ("me", "espera"),
];

/// Substituições mecânicas palavra-a-palavra usadas pela estratégia de
/// contração do corretor ("para" → "pra"). Todas reduzem a contagem
/// silábica sem alterar o sentido no registro cantado.
const SPOKEN_CONTRACTIONS: &[(&str, &str)] = &[
    ("para", "pra"),
    ("você", "cê"),
    ("vocês", "cês"),
    ("está", "tá"),
    ("estás", "tás"),
    ("estava", "tava"),
    ("estou", "tô"),
    ("estamos", "tamo"),
    ("senhora", "sinhá"),
];

/// Dicionário de correção: frases inteiras já validadas que reduzem a
/// contagem mantendo o sentido. Chaves mais longas têm prioridade.
const DICTIONARY_FIXES: &[(&str, &str)] = &[
    ("dentro do meu coração", "no meu coração"),
    ("por causa de você", "por você"),
    ("neste exato momento", "agora"),
    ("eu tenho a certeza", "eu sei"),
    ("a minha saudade", "minha saudade"),
    ("o meu amor", "meu amor"),
    ("a minha vida", "minha vida"),
    ("juntamente com", "junto com"),
    ("naquele momento", "naquela hora"),
    ("é necessário", "é preciso"),
];

/// Sinônimos mais curtos para a estratégia de simplificação semântica.
const SHORTER_SYNONYMS: &[(&str, &str)] = &[
    ("entretanto", "mas"),
    ("porém", "mas"),
    ("necessito", "quero"),
    ("felicidade", "alegria"),
    ("verdadeiramente", "de verdade"),
    ("completamente", "todo"),
    ("acompanhado", "junto"),
    ("distante", "longe"),
];

/// Palavras funcionais átonas: ignoradas ao escolher a palavra de rima e
/// proibidas como final de verso pelo corretor (verso "pendurado").
const FUNCTION_WORDS: &[&str] = &[
    "o", "a", "os", "as", "um", "uma", "uns", "umas",
    "de", "do", "da", "dos", "das", "em", "no", "na", "nos", "nas",
    "por", "pelo", "pela", "com", "sem", "sob", "sobre", "para", "pra",
    "e", "ou", "mas", "que", "se", "nem",
    "meu", "minha", "meus", "minhas", "teu", "tua", "seu", "sua",
];

/// Léxico fechado de classe gramatical (vocabulário recorrente em letra).
const WORD_CLASSES: &[(&str, GramClass)] = &[
    ("amor", GramClass::Substantivo),
    ("dor", GramClass::Substantivo),
    ("flor", GramClass::Substantivo),
    ("calor", GramClass::Substantivo),
    ("coracao", GramClass::Substantivo),
    ("razao", GramClass::Substantivo),
    ("paixao", GramClass::Substantivo),
    ("solidao", GramClass::Substantivo),
    ("ilusao", GramClass::Substantivo),
    ("cancao", GramClass::Substantivo),
    ("saudade", GramClass::Substantivo),
    ("vida", GramClass::Substantivo),
    ("estrada", GramClass::Substantivo),
    ("viola", GramClass::Substantivo),
    ("sertao", GramClass::Substantivo),
    ("mar", GramClass::Substantivo),
    ("luar", GramClass::Substantivo),
    ("lugar", GramClass::Substantivo),
    ("mulher", GramClass::Substantivo),
    ("prazer", GramClass::Substantivo),
    ("feliz", GramClass::Adjetivo),
    ("sozinho", GramClass::Adjetivo),
    ("sozinha", GramClass::Adjetivo),
    ("perdido", GramClass::Adjetivo),
    ("perdida", GramClass::Adjetivo),
    ("devagar", GramClass::Adverbio),
    ("demais", GramClass::Adverbio),
    ("cantar", GramClass::Verbo),
    ("amar", GramClass::Verbo),
    ("sonhar", GramClass::Verbo),
    ("chorar", GramClass::Verbo),
    ("voltar", GramClass::Verbo),
    ("sofrer", GramClass::Verbo),
    ("viver", GramClass::Verbo),
    ("querer", GramClass::Verbo),
    ("partir", GramClass::Verbo),
    ("sentir", GramClass::Verbo),
];

/// Substantivos concretos (tocáveis, visíveis) do vocabulário de canção.
const CONCRETE_NOUNS: &[&str] = &[
    "flor", "mar", "luar", "estrada", "viola", "violao", "porta", "janela",
    "chao", "pedra", "rio", "lua", "sol", "casa", "cama", "copo", "mesa",
    "sertao", "cidade", "rua", "carro", "trem", "chuva", "vento",
];

/// Substantivos abstratos (estados, sentimentos).
const ABSTRACT_NOUNS: &[&str] = &[
    "amor", "dor", "saudade", "paixao", "coracao", "razao", "solidao",
    "ilusao", "emocao", "esperanca", "tristeza", "alegria", "medo",
    "vida", "sorte", "destino", "desejo", "vontade", "lembranca",
];

/// Sufixos verbais para a heurística de classe gramatical.
const VERB_SUFFIXES: &[&str] = &["ar", "er", "ir", "ou", "ei", "amos", "emos"];

/// Sufixos tipicamente nominais.
const NOUN_SUFFIXES: &[&str] = &["cao", "sao", "dade", "mento", "agem", "ura", "eza"];

/// Sufixos tipicamente adjetivais.
const ADJ_SUFFIXES: &[&str] = &["oso", "osa", "ivel", "avel", "ente", "ante"];

/// Classes de terminação intercambiáveis no canto: terminações que a
/// tradição da canção popular trata como rima consoante mesmo com vogal
/// tônica distinta (coda em "r" aberto: "amor"/"cantar"; nasais /ãw̃/:
/// "cantam"/"coração").
const ENDING_CLASSES: &[&[&str]] = &[
    &["ar", "or"],
    &["ao", "am"],
];

/// Todas as tabelas lexicais do motor, compiladas uma única vez.
///
/// Construído com [`Lexicon::default()`] no início do processo e passado
/// por referência (`&Lexicon`) a todos os componentes. Nunca é mutado.
pub struct Lexicon {
    stress_exceptions: HashMap<String, StressClass>,
    contractions: Vec<(String, String)>,
    spoken_contractions: Vec<(String, String)>,
    dictionary_fixes: Vec<(String, String)>,
    shorter_synonyms: Vec<(String, String)>,
    function_words: HashSet<String>,
    word_classes: HashMap<String, GramClass>,
    concrete_nouns: HashSet<String>,
    abstract_nouns: HashSet<String>,
}

impl Lexicon {
    /// Compila todas as tabelas fechadas.
    pub fn new() -> Self {
        let mut dictionary_fixes: Vec<(String, String)> = DICTIONARY_FIXES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        // Frases mais longas primeiro: "dentro do meu coração" deve casar
        // antes de "o meu amor"
        dictionary_fixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            stress_exceptions: STRESS_EXCEPTIONS
                .iter()
                .map(|(w, c)| (w.to_string(), *c))
                .collect(),
            contractions: CONTRACTIONS
                .iter()
                .map(|(l, r)| (l.to_string(), r.to_string()))
                .collect(),
            spoken_contractions: SPOKEN_CONTRACTIONS
                .iter()
                .map(|(l, r)| (l.to_string(), r.to_string()))
                .collect(),
            dictionary_fixes,
            shorter_synonyms: SHORTER_SYNONYMS
                .iter()
                .map(|(l, r)| (l.to_string(), r.to_string()))
                .collect(),
            function_words: FUNCTION_WORDS.iter().map(|w| w.to_string()).collect(),
            word_classes: WORD_CLASSES
                .iter()
                .map(|(w, c)| (w.to_string(), *c))
                .collect(),
            concrete_nouns: CONCRETE_NOUNS.iter().map(|w| w.to_string()).collect(),
            abstract_nouns: ABSTRACT_NOUNS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Consulta a exceção de tonicidade (chave: minúscula sem diacríticos).
    pub fn stress_exception(&self, normalized: &str) -> Option<StressClass> {
        self.stress_exceptions.get(normalized).copied()
    }

    /// Verifica se o par de palavras adjacentes é uma contração
    /// lexicalizada ("de"+vogal, "que"+"eu"). A direita da tabela pode
    /// ser `*`, casando com qualquer palavra iniciada em vogal.
    pub fn is_contraction_pair(&self, left: &str, right: &str) -> bool {
        self.contractions.iter().any(|(l, r)| {
            l == left
                && (r == right
                    || (r == "*"
                        && right
                            .chars()
                            .next()
                            .map(crate::syllabifier::is_vowel)
                            .unwrap_or(false)))
        })
    }

    /// Tabela "para"→"pra" usada pela estratégia de contração do corretor.
    pub fn spoken_contractions(&self) -> &[(String, String)] {
        &self.spoken_contractions
    }

    /// Substituições de frase do dicionário de correção (mais longas primeiro).
    pub fn dictionary_fixes(&self) -> &[(String, String)] {
        &self.dictionary_fixes
    }

    /// Sinônimos mais curtos para a simplificação semântica.
    pub fn shorter_synonyms(&self) -> &[(String, String)] {
        &self.shorter_synonyms
    }

    /// Palavra funcional átona? (artigos, preposições, conjunções)
    pub fn is_function_word(&self, normalized: &str) -> bool {
        self.function_words.contains(normalized)
    }

    /// Classe gramatical: léxico fechado primeiro, heurística de sufixo depois.
    pub fn word_class(&self, normalized: &str) -> Option<GramClass> {
        if let Some(class) = self.word_classes.get(normalized) {
            return Some(*class);
        }
        if normalized.ends_with("mente") {
            return Some(GramClass::Adverbio);
        }
        for suffix in NOUN_SUFFIXES {
            if normalized.ends_with(suffix) && normalized.len() > suffix.len() + 1 {
                return Some(GramClass::Substantivo);
            }
        }
        for suffix in ADJ_SUFFIXES {
            if normalized.ends_with(suffix) && normalized.len() > suffix.len() + 1 {
                return Some(GramClass::Adjetivo);
            }
        }
        for suffix in VERB_SUFFIXES {
            if normalized.ends_with(suffix) && normalized.len() > suffix.len() + 1 {
                return Some(GramClass::Verbo);
            }
        }
        None
    }

    /// Bucket de concretude, se a palavra estiver em uma das listas fechadas.
    pub fn concreteness(&self, normalized: &str) -> Option<Concreteness> {
        if self.concrete_nouns.contains(normalized) {
            Some(Concreteness::Concreto)
        } else if self.abstract_nouns.contains(normalized) {
            Some(Concreteness::Abstrato)
        } else {
            None
        }
    }

    /// As duas terminações pertencem à mesma classe de terminação cantada?
    pub fn same_ending_class(&self, a: &str, b: &str) -> bool {
        ENDING_CLASSES
            .iter()
            .any(|class| class.contains(&a) && class.contains(&b))
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_exception_lookup() {
        let lex = Lexicon::new();
        assert_eq!(lex.stress_exception("musica"), Some(StressClass::Proparoxitona));
        assert_eq!(lex.stress_exception("amor"), Some(StressClass::Oxitona));
        assert_eq!(lex.stress_exception("inexistente"), None);
    }

    #[test]
    fn test_contraction_pair() {
        let lex = Lexicon::new();
        assert!(lex.is_contraction_pair("de", "amor"));
        assert!(lex.is_contraction_pair("que", "eu"));
        assert!(!lex.is_contraction_pair("de", "dor"));
        assert!(!lex.is_contraction_pair("com", "amor"));
    }

    #[test]
    fn test_word_class_suffix_heuristics() {
        let lex = Lexicon::new();
        assert_eq!(lex.word_class("cantar"), Some(GramClass::Verbo));
        assert_eq!(lex.word_class("emocao"), Some(GramClass::Substantivo));
        assert_eq!(lex.word_class("carinhoso"), Some(GramClass::Adjetivo));
        assert_eq!(lex.word_class("lentamente"), Some(GramClass::Adverbio));
        assert_eq!(lex.word_class("xyz"), None);
    }

    #[test]
    fn test_lexicon_beats_suffix() {
        let lex = Lexicon::new();
        // "luar" termina em -ar mas é substantivo no léxico fechado
        assert_eq!(lex.word_class("luar"), Some(GramClass::Substantivo));
    }

    #[test]
    fn test_concreteness_buckets() {
        let lex = Lexicon::new();
        assert_eq!(lex.concreteness("flor"), Some(Concreteness::Concreto));
        assert_eq!(lex.concreteness("amor"), Some(Concreteness::Abstrato));
        assert_eq!(lex.concreteness("paralelepipedo"), None);
    }

    #[test]
    fn test_ending_classes() {
        let lex = Lexicon::new();
        assert!(lex.same_ending_class("ar", "or"));
        assert!(lex.same_ending_class("ao", "am"));
        assert!(!lex.same_ending_class("ar", "ao"));
    }

    #[test]
    fn test_dictionary_fixes_longest_first() {
        let lex = Lexicon::new();
        let fixes = lex.dictionary_fixes();
        for pair in fixes.windows(2) {
            assert!(pair[0].0.len() >= pair[1].0.len());
        }
    }
}
