//! Static rule tables for French syllabification.
//!
//! All tables are immutable and baked into the binary with `phf`, the same
//! way the syllable inventories are. Corrections coming from reviewers live
//! in the correction store, never here, so nothing in this module mutates at
//! runtime.
//!
//! The exception dictionary is keyed by the *lowercase surface form* (not the
//! stripped normalization key): apostrophes and accents are significant for
//! segmentation even though they are removed from lookup keys. Values encode
//! the curated segmentation with `-` separators, e.g. `"im-por-tant"`.

/// Hand-curated segmentations for frequent function words and irregular
/// forms. These bypass the rule engine entirely; the cuts were chosen for
/// pedagogical clarity, not phonetic precision.
pub static EXCEPTIONS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "alors" => "a-lors",
    "après" => "a-près",
    "assez" => "as-sez",
    "aucun" => "au-cun",
    "aucune" => "au-cu-ne",
    "aujourd'hui" => "au-jour-d'hui",
    "aussi" => "aus-si",
    "autour" => "au-tour",
    "autre" => "au-tre",
    "avant" => "a-vant",
    "avec" => "avec",
    "beaucoup" => "beau-coup",
    "bientôt" => "bien-tôt",
    "bonjour" => "bon-jour",
    "bonsoir" => "bon-soir",
    "bronzette" => "bron-zette",
    "cependant" => "ce-pen-dant",
    "chacun" => "cha-cun",
    "chacune" => "cha-cu-ne",
    "chaque" => "cha-que",
    "combien" => "com-bien",
    "comme" => "com-me",
    "comment" => "com-ment",
    "contre" => "con-tre",
    "depuis" => "de-puis",
    "derrière" => "der-rière",
    "dessous" => "des-sous",
    "dessus" => "des-sus",
    "devant" => "de-vant",
    "donc" => "donc",
    "encore" => "en-core",
    "enfant" => "en-fant",
    "enfants" => "en-fants",
    "enfin" => "en-fin",
    "ensemble" => "en-sem-ble",
    "ensuite" => "en-suite",
    "entre" => "en-tre",
    "environ" => "en-vi-ron",
    "famille" => "fa-mille",
    "femme" => "fem-me",
    "fille" => "fille",
    "filles" => "filles",
    "garçon" => "gar-çon",
    "grâce" => "grâ-ce",
    "heure" => "heu-re",
    "hier" => "hier",
    "histoire" => "his-toire",
    "homme" => "hom-me",
    "important" => "im-por-tant",
    "jamais" => "ja-mais",
    "jusqu'à" => "jus-qu'à",
    "lorsque" => "lors-que",
    "madame" => "ma-dame",
    "mademoiselle" => "ma-de-moi-selle",
    "maintenant" => "main-te-nant",
    "malgré" => "mal-gré",
    "merci" => "mer-ci",
    "mieux" => "mieux",
    "moins" => "moins",
    "monsieur" => "mon-sieur",
    "notre" => "no-tre",
    "nouveau" => "nou-veau",
    "oiseau" => "oi-seau",
    "oiseaux" => "oi-seaux",
    "parce" => "par-ce",
    "parfois" => "par-fois",
    "parmi" => "par-mi",
    "pendant" => "pen-dant",
    "personne" => "per-son-ne",
    "petit" => "pe-tit",
    "petite" => "pe-ti-te",
    "plusieurs" => "plu-sieurs",
    "pourquoi" => "pour-quoi",
    "pourtant" => "pour-tant",
    "premier" => "pre-mier",
    "première" => "pre-miè-re",
    "presque" => "pres-que",
    "presqu'île" => "pres-qu'île",
    "quand" => "quand",
    "quelque" => "quel-que",
    "quelqu'un" => "quel-qu'un",
    "question" => "ques-tion",
    "rien" => "rien",
    "souvent" => "sou-vent",
    "surtout" => "sur-tout",
    "toujours" => "tou-jours",
    "travail" => "tra-vail",
    "travailler" => "tra-vail-ler",
    "voiture" => "voi-tu-re",
    "vraiment" => "vrai-ment",
    "école" => "é-cole",
};

/// Two-consonant clusters that stay together as the onset of the following
/// syllable. Doubled letters (ll, ss, tt, ...) are handled separately in the
/// scanner and do not need entries here.
pub static INSEPARABLE_CLUSTERS: phf::Set<&'static str> = phf::phf_set! {
    "bl", "br", "ch", "cl", "cr", "dr", "fl", "fr", "gl", "gn", "gr",
    "ph", "pl", "pr", "sc", "st", "th", "tr", "vr",
};

/// Vowel pairs that mark a syllable boundary when adjacent (hiatus).
/// Compared on base letters, so "é-a" matches the "ea" entry. Anything not
/// listed here is treated as a diphthong and left unsplit.
pub static HIATUS_SPLITS: phf::Set<&'static str> = phf::phf_set! {
    "ia", "ie", "io", "iu", "ua", "ue", "ui", "uo", "ea", "eo",
};

/// Elided article/pronoun prefixes dropped during batch tokenization:
/// "l'école" contributes the word "école", not "l'école".
pub static ELISION_PREFIXES: phf::Set<&'static str> = phf::phf_set! {
    "c", "d", "j", "l", "m", "n", "s", "t",
    "qu", "jusqu", "lorsqu", "puisqu", "quoiqu",
};

/// Vowel test covering the accented forms used in French orthography.
/// Case-insensitive.
pub fn is_vowel(c: char) -> bool {
    matches!(
        base_letter(c),
        'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'œ' | 'æ'
    )
}

/// Strip the accent from a single letter and lowercase it, so cluster and
/// hiatus tables can be consulted with plain ASCII keys.
pub fn base_letter(c: char) -> char {
    match c.to_lowercase().next().unwrap_or(c) {
        'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' => 'i',
        'ô' | 'ö' => 'o',
        'ù' | 'û' | 'ü' => 'u',
        'ÿ' => 'y',
        'ç' => 'c',
        lc => lc,
    }
}
