//! Display language handling.
//!
//! The catalog keeps canonical English identifiers plus Korean names from
//! the upstream data set; everything else shown in the UI comes from the
//! static label tables below.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Ko,
            Language::Ko => Language::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ko => "ko",
        }
    }
}

/// Static UI strings for one language.
pub struct Labels {
    pub title: &'static str,
    pub search_placeholder: &'static str,
    pub loading_catalog: &'static str,
    pub catalog_failed: &'static str,
    pub retry_hint: &'static str,
    pub no_results: &'static str,
    pub favorites_only: &'static str,
    pub all_generations: &'static str,
    pub generation_prefix: &'static str,
    pub page: &'static str,
    pub height: &'static str,
    pub weight: &'static str,
    pub abilities: &'static str,
    pub base_stats: &'static str,
    pub evolution: &'static str,
    pub detail_loading: &'static str,
    pub detail_failed: &'static str,
    pub flavor_missing: &'static str,
}

const LABELS_EN: Labels = Labels {
    title: "Pokédex",
    search_placeholder: "search by name or number",
    loading_catalog: "Loading catalog...",
    catalog_failed: "Could not load the catalog",
    retry_hint: "press r to retry",
    no_results: "No matching entries",
    favorites_only: "favorites",
    all_generations: "all generations",
    generation_prefix: "gen",
    page: "page",
    height: "Height",
    weight: "Weight",
    abilities: "Abilities",
    base_stats: "Base Stats",
    evolution: "Evolution",
    detail_loading: "Loading entry...",
    detail_failed: "Could not load this entry",
    flavor_missing: "No description available.",
};

const LABELS_KO: Labels = Labels {
    title: "포켓몬 도감",
    search_placeholder: "이름 또는 번호로 검색",
    loading_catalog: "도감 불러오는 중...",
    catalog_failed: "도감을 불러오지 못했습니다",
    retry_hint: "r 키로 다시 시도",
    no_results: "검색 결과가 없습니다",
    favorites_only: "즐겨찾기",
    all_generations: "모든 세대",
    generation_prefix: "세대",
    page: "페이지",
    height: "키",
    weight: "몸무게",
    abilities: "특성",
    base_stats: "종족값",
    evolution: "진화",
    detail_loading: "불러오는 중...",
    detail_failed: "정보를 불러오지 못했습니다",
    flavor_missing: "설명이 없습니다.",
};

pub fn labels(lang: Language) -> &'static Labels {
    match lang {
        Language::En => &LABELS_EN,
        Language::Ko => &LABELS_KO,
    }
}

/// Localized name for a type tag. Unknown tags fall through unchanged.
pub fn type_label(tag: &str, lang: Language) -> &str {
    if lang == Language::En {
        return tag;
    }
    match tag {
        "normal" => "노말",
        "fire" => "불꽃",
        "water" => "물",
        "electric" => "전기",
        "grass" => "풀",
        "ice" => "얼음",
        "fighting" => "격투",
        "poison" => "독",
        "ground" => "땅",
        "flying" => "비행",
        "psychic" => "에스퍼",
        "bug" => "벌레",
        "rock" => "바위",
        "ghost" => "고스트",
        "dragon" => "드래곤",
        "dark" => "악",
        "steel" => "강철",
        "fairy" => "페어리",
        other => other,
    }
}

/// Localized name for a base stat. Unknown stats fall through unchanged.
pub fn stat_label(stat: &str, lang: Language) -> &str {
    match lang {
        Language::En => match stat {
            "hp" => "HP",
            "attack" => "Attack",
            "defense" => "Defense",
            "special-attack" => "Sp. Atk",
            "special-defense" => "Sp. Def",
            "speed" => "Speed",
            other => other,
        },
        Language::Ko => match stat {
            "hp" => "체력",
            "attack" => "공격",
            "defense" => "방어",
            "special-attack" => "특수공격",
            "special-defense" => "특수방어",
            "speed" => "스피드",
            other => other,
        },
    }
}
