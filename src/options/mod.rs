//! Option resolution for code generation targets
//!
//! Maps a (language, variant) pair to its canonical set of boolean
//! generation options: display labels and default values. The tables are
//! static and the lookup is pure, so resolution is safe to call from
//! anywhere without caching.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A set of boolean generation toggles keyed by option key
pub type OptionSet = BTreeMap<String, bool>;

/// Languages the generation backend can emit models for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    TypeScript,
    CSharp,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 3] = [Language::Java, Language::TypeScript, Language::CSharp];

    /// Stable identifier used in CLI arguments and persisted settings
    pub fn key(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::TypeScript => "typescript",
            Language::CSharp => "csharp",
        }
    }

    /// Every selectable variant for this language
    pub fn variants(&self) -> Vec<TypeVariant> {
        match self {
            Language::Java => JavaVariant::ALL.iter().map(|v| v.to_variant()).collect(),
            Language::TypeScript => TsVariant::ALL.iter().map(|v| v.to_variant()).collect(),
            Language::CSharp => CsVariant::ALL.iter().map(|v| v.to_variant()).collect(),
        }
    }

    /// The variant selected when no stored selection exists
    pub fn default_variant(&self) -> TypeVariant {
        match self {
            Language::Java => TypeVariant::Java(JavaVariant::DEFAULT),
            Language::TypeScript => TypeVariant::TypeScript(TsVariant::DEFAULT),
            Language::CSharp => TypeVariant::CSharp(CsVariant::DEFAULT),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "java" => Ok(Language::Java),
            "typescript" => Ok(Language::TypeScript),
            "csharp" => Ok(Language::CSharp),
            other => Err(format!(
                "Unknown language '{}', expected one of: java, typescript, csharp",
                other
            )),
        }
    }
}

/// Shared behavior of a language's variant enumeration
pub trait VariantSet: Copy + Ord + Sized + 'static {
    /// Every variant of the language, in display order
    const ALL: &'static [Self];

    /// The variant selected by default
    const DEFAULT: Self;

    /// Stable identifier used in CLI arguments and persisted settings
    fn key(&self) -> &'static str;

    /// Parse a stored variant key; unknown keys return `None`
    fn from_key(key: &str) -> Option<Self>;

    /// Wrap into the language-tagged variant union
    fn to_variant(self) -> TypeVariant;
}

/// Output shapes for generated Java models
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JavaVariant {
    Dto,
    Record,
}

impl VariantSet for JavaVariant {
    const ALL: &'static [JavaVariant] = &[JavaVariant::Dto, JavaVariant::Record];
    const DEFAULT: JavaVariant = JavaVariant::Dto;

    fn key(&self) -> &'static str {
        match self {
            JavaVariant::Dto => "dto",
            JavaVariant::Record => "record",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "dto" => Some(JavaVariant::Dto),
            "record" => Some(JavaVariant::Record),
            _ => None,
        }
    }

    fn to_variant(self) -> TypeVariant {
        TypeVariant::Java(self)
    }
}

/// Output shapes for generated TypeScript models
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TsVariant {
    Interface,
    Class,
    #[serde(rename = "type")]
    Alias,
    Zod,
}

impl VariantSet for TsVariant {
    const ALL: &'static [TsVariant] = &[
        TsVariant::Interface,
        TsVariant::Class,
        TsVariant::Alias,
        TsVariant::Zod,
    ];
    const DEFAULT: TsVariant = TsVariant::Interface;

    fn key(&self) -> &'static str {
        match self {
            TsVariant::Interface => "interface",
            TsVariant::Class => "class",
            TsVariant::Alias => "type",
            TsVariant::Zod => "zod",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "interface" => Some(TsVariant::Interface),
            "class" => Some(TsVariant::Class),
            "type" => Some(TsVariant::Alias),
            "zod" => Some(TsVariant::Zod),
            _ => None,
        }
    }

    fn to_variant(self) -> TypeVariant {
        TypeVariant::TypeScript(self)
    }
}

/// Output shapes for generated C# models
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsVariant {
    Class,
    Record,
    Dto,
}

impl VariantSet for CsVariant {
    const ALL: &'static [CsVariant] = &[CsVariant::Class, CsVariant::Record, CsVariant::Dto];
    const DEFAULT: CsVariant = CsVariant::Class;

    fn key(&self) -> &'static str {
        match self {
            CsVariant::Class => "class",
            CsVariant::Record => "record",
            CsVariant::Dto => "dto",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "class" => Some(CsVariant::Class),
            "record" => Some(CsVariant::Record),
            "dto" => Some(CsVariant::Dto),
            _ => None,
        }
    }

    fn to_variant(self) -> TypeVariant {
        TypeVariant::CSharp(self)
    }
}

/// A (language, variant) pair
///
/// The tag carries the language, so a variant can never be paired with the
/// wrong language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeVariant {
    Java(JavaVariant),
    TypeScript(TsVariant),
    CSharp(CsVariant),
}

impl TypeVariant {
    /// The language this variant belongs to
    pub fn language(&self) -> Language {
        match self {
            TypeVariant::Java(_) => Language::Java,
            TypeVariant::TypeScript(_) => Language::TypeScript,
            TypeVariant::CSharp(_) => Language::CSharp,
        }
    }

    /// Stable identifier used in CLI arguments and persisted settings
    pub fn key(&self) -> &'static str {
        match self {
            TypeVariant::Java(v) => v.key(),
            TypeVariant::TypeScript(v) => v.key(),
            TypeVariant::CSharp(v) => v.key(),
        }
    }

    /// Human-readable variant name for listings
    pub fn label(&self) -> &'static str {
        match self {
            TypeVariant::Java(JavaVariant::Dto) => "Java DTO",
            TypeVariant::Java(JavaVariant::Record) => "Java Record",
            TypeVariant::TypeScript(TsVariant::Interface) => "Interface",
            TypeVariant::TypeScript(TsVariant::Class) => "Class",
            TypeVariant::TypeScript(TsVariant::Alias) => "Type Alias",
            TypeVariant::TypeScript(TsVariant::Zod) => "Zod Schema",
            TypeVariant::CSharp(CsVariant::Class) => "C# Class",
            TypeVariant::CSharp(CsVariant::Record) => "C# Record",
            TypeVariant::CSharp(CsVariant::Dto) => "C# DTO",
        }
    }

    /// Parse a variant key within a language; unknown keys return `None`
    pub fn parse(language: Language, key: &str) -> Option<TypeVariant> {
        match language {
            Language::Java => JavaVariant::from_key(key).map(TypeVariant::Java),
            Language::TypeScript => TsVariant::from_key(key).map(TypeVariant::TypeScript),
            Language::CSharp => CsVariant::from_key(key).map(TypeVariant::CSharp),
        }
    }
}

impl fmt::Display for TypeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.language().key(), self.key())
    }
}

/// One boolean generation option: key, display label, default value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub default: bool,
}

const fn opt(key: &'static str, label: &'static str, default: bool) -> OptionSpec {
    OptionSpec {
        key,
        label,
        default,
    }
}

const JAVA_CLASS_OPTIONS: &[OptionSpec] = &[
    opt("getter", "Add @Getter", false),
    opt("setter", "Add @Setter", false),
    opt("no_args_constructor", "Add @NoArgsConstructor", false),
    opt("all_args_constructor", "Add @AllArgsConstructor", false),
    opt("builder", "Add @Builder", true),
    opt("data", "Add @Data", true),
    opt("swagger_annotations", "Add Swagger Annotations", true),
    opt("serializable", "Implement Serializable", false),
    opt("jackson_annotations", "Add Jackson Annotations", false),
    opt("extra_spacing", "Extra Spacing", false),
];

const JAVA_RECORD_OPTIONS: &[OptionSpec] = &[
    opt("builder", "Builder pattern", false),
    opt("extra_spacing", "Add space formatting", false),
    opt("swagger_annotations", "Add Swagger Annotations", true),
    opt("jackson_annotations", "Add Jackson Annotations", false),
];

// Interface, class, and type-alias output share one option shape.
const TS_OBJECT_OPTIONS: &[OptionSpec] = &[
    opt("export_all_types", "Export All Types", false),
    opt("readonly_properties", "Use readonly Properties", true),
    opt("optional_properties", "Use Optional Properties", false),
    opt("strict_null_checks", "Enable strictNullChecks", true),
    opt("comments", "Add Comments", false),
    opt("js_doc_comments", "Add JSDoc Comments", false),
    opt("partial_type", "Generate Partial", false),
    opt("readonly_type", "Generate Readonly", false),
    opt("extra_spacing", "Extra Spacing", false),
];

const TS_ZOD_OPTIONS: &[OptionSpec] = &[
    opt("export_all_types", "Export All Types", false),
    opt("all_optional", "Use Optional Properties", true),
    opt("comments", "Add Comments", false),
    opt("nullable", "Make all Nullable", false),
    opt("nullish", "Make all Nullable and Optional", false),
    opt("max_value", "Use Max", false),
    opt("trim_strings", "Apply trim() to Strings", true),
];

const CS_CLASS_OPTIONS: &[OptionSpec] = &[
    opt("extra_spacing", "Add space formatting", false),
    opt("nullable", "Nullable reference types", true),
    opt("json_property_name", "JsonPropertyName attributes", false),
    opt("data_annotations", "Data annotations", false),
    opt("init_only_setters", "Init-only setters", false),
    opt("property_changed_notify", "INotifyPropertyChanged", false),
];

const CS_RECORD_OPTIONS: &[OptionSpec] = &[
    opt("extra_spacing", "Add space formatting", false),
    opt("nullable", "Nullable reference types", true),
    opt("json_property_name", "JsonPropertyName attributes", false),
    opt("primary_constructor", "Primary constructor", true),
    opt("with_expression", "With expression support", false),
    opt("positional_syntax", "Positional record syntax", false),
];

/// Resolve the canonical option table for a (language, variant) pair
///
/// Dispatches by language, then by variant. Variants without a table of
/// their own resolve to their language's class table: Java `dto` and C#
/// `dto` both read the class shape.
pub fn variant_options(variant: TypeVariant) -> &'static [OptionSpec] {
    match variant {
        TypeVariant::Java(v) => match v {
            JavaVariant::Record => JAVA_RECORD_OPTIONS,
            JavaVariant::Dto => JAVA_CLASS_OPTIONS,
        },
        TypeVariant::TypeScript(v) => match v {
            TsVariant::Zod => TS_ZOD_OPTIONS,
            TsVariant::Interface | TsVariant::Class | TsVariant::Alias => TS_OBJECT_OPTIONS,
        },
        TypeVariant::CSharp(v) => match v {
            CsVariant::Record => CS_RECORD_OPTIONS,
            CsVariant::Class | CsVariant::Dto => CS_CLASS_OPTIONS,
        },
    }
}

/// Display labels for every option of a (language, variant) pair
pub fn option_labels(variant: TypeVariant) -> BTreeMap<String, String> {
    variant_options(variant)
        .iter()
        .map(|spec| (spec.key.to_string(), spec.label.to_string()))
        .collect()
}

/// Default values for every option of a (language, variant) pair
pub fn default_options(variant: TypeVariant) -> OptionSet {
    variant_options(variant)
        .iter()
        .map(|spec| (spec.key.to_string(), spec.default))
        .collect()
}

/// Look up one option spec by key within a variant's table
pub fn find_option(variant: TypeVariant, key: &str) -> Option<&'static OptionSpec> {
    variant_options(variant).iter().find(|spec| spec.key == key)
}

/// Target dialects for persistence-mapper generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapperLanguage {
    #[serde(rename = "mybatis-xml")]
    MybatisXml,
    #[serde(rename = "mybatis-annotation")]
    MybatisAnnotation,
}

impl FromStr for MapperLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mybatis-xml" => Ok(MapperLanguage::MybatisXml),
            "mybatis-annotation" => Ok(MapperLanguage::MybatisAnnotation),
            other => Err(format!(
                "Unknown mapper target '{}', expected one of: mybatis-xml, mybatis-annotation",
                other
            )),
        }
    }
}

/// One mapper CRUD operation toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperOperation {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// The mapper operations offered by the backend
pub const MAPPER_OPERATIONS: &[MapperOperation] = &[
    MapperOperation {
        key: "all_crud",
        label: "ALL CRUD",
        description: "Generate all CRUD operations",
    },
    MapperOperation {
        key: "select",
        label: "SELECT",
        description: "Read/query operations",
    },
    MapperOperation {
        key: "insert",
        label: "INSERT",
        description: "Create operations",
    },
    MapperOperation {
        key: "update",
        label: "UPDATE",
        description: "Update operations",
    },
    MapperOperation {
        key: "delete",
        label: "DELETE",
        description: "Delete operations",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<TypeVariant> {
        Language::ALL
            .iter()
            .flat_map(|language| language.variants())
            .collect()
    }

    #[test]
    fn test_every_variant_has_a_table() {
        for variant in all_variants() {
            assert!(
                !variant_options(variant).is_empty(),
                "empty option table for {}",
                variant
            );
        }
    }

    #[test]
    fn test_labels_and_defaults_share_key_set() {
        for variant in all_variants() {
            let labels = option_labels(variant);
            let defaults = default_options(variant);
            let label_keys: Vec<_> = labels.keys().collect();
            let default_keys: Vec<_> = defaults.keys().collect();
            assert_eq!(label_keys, default_keys, "key mismatch for {}", variant);
        }
    }

    #[test]
    fn test_no_duplicate_keys_within_a_table() {
        for variant in all_variants() {
            let table = variant_options(variant);
            let unique: std::collections::BTreeSet<_> =
                table.iter().map(|spec| spec.key).collect();
            assert_eq!(unique.len(), table.len(), "duplicate key in {}", variant);
        }
    }

    #[test]
    fn test_csharp_dto_resolves_to_class_table() {
        assert_eq!(
            variant_options(TypeVariant::CSharp(CsVariant::Dto)),
            variant_options(TypeVariant::CSharp(CsVariant::Class)),
        );
    }

    #[test]
    fn test_java_record_defaults() {
        let defaults = default_options(TypeVariant::Java(JavaVariant::Record));
        assert_eq!(defaults.len(), 4);
        assert!(defaults["swagger_annotations"]);
        assert!(!defaults["builder"]);
        assert!(!defaults["extra_spacing"]);
        assert!(!defaults["jackson_annotations"]);
    }

    #[test]
    fn test_java_dto_uses_class_shape() {
        let defaults = default_options(TypeVariant::Java(JavaVariant::Dto));
        assert_eq!(defaults.len(), 10);
        assert!(defaults["builder"]);
        assert!(defaults["data"]);
        assert!(defaults["swagger_annotations"]);
        assert!(!defaults["getter"]);
    }

    #[rstest::rstest]
    #[case(Language::Java, "dto")]
    #[case(Language::TypeScript, "interface")]
    #[case(Language::CSharp, "class")]
    fn test_default_variant_keys(#[case] language: Language, #[case] key: &str) {
        assert_eq!(language.default_variant().key(), key);
        assert_eq!(language.default_variant().language(), language);
    }

    #[test]
    fn test_variant_key_round_trip() {
        for variant in all_variants() {
            let parsed = TypeVariant::parse(variant.language(), variant.key());
            assert_eq!(parsed, Some(variant));
        }
        assert_eq!(TypeVariant::parse(Language::Java, "pojo"), None);
        assert_eq!(TypeVariant::parse(Language::TypeScript, "dto"), None);
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("java".parse::<Language>().unwrap(), Language::Java);
        assert_eq!(
            "typescript".parse::<Language>().unwrap(),
            Language::TypeScript
        );
        assert!("kotlin".parse::<Language>().is_err());
    }
}
