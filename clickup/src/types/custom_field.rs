//! Custom Fields do ClickUp (lado leitura)
//!
//! ⚠️ IMPORTANTE: `value` e `orderindex` mudam de forma conforme o tipo do campo
//! e a versão da resposta (string, número, lista ou null). Ficam como
//! `serde_json::Value` e a interpretação fica com quem consome.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Representa um custom field anexado a uma tarefa
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomField {
    /// ID do custom field (UUID)
    #[serde(default)]
    pub id: Option<String>,

    /// Nome de exibição do campo
    #[serde(default)]
    pub name: Option<String>,

    /// Tipo do campo (drop_down, labels, text...)
    #[serde(rename = "type", default)]
    pub type_: Option<String>,

    /// Configuração específica do tipo de campo
    #[serde(default)]
    pub type_config: Option<TypeConfig>,

    /// Valor bruto: escalar, lista de escalares ou ausente (`null` vira `None`)
    #[serde(default)]
    pub value: Option<JsonValue>,
}

/// Configuração do tipo de campo; só as opções interessam aqui
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Opções de dropdown/labels. Entradas nulas ou malformadas são descartadas
    /// uma a uma, sem derrubar o campo.
    #[serde(default, deserialize_with = "deserialize_options")]
    pub options: Option<Vec<FieldOption>>,
}

/// Opção de dropdown/labels
///
/// Dropdowns trazem `name` + `orderindex`; labels trazem `label`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldOption {
    /// ID da opção (UUID em geral, às vezes numérico)
    #[serde(default)]
    pub id: Option<JsonValue>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    /// Cor da opção (string hex ou objeto, conforme a versão da API)
    #[serde(default)]
    pub color: Option<JsonValue>,

    /// Posição da opção; só conta quando for inteiro
    #[serde(default)]
    pub orderindex: Option<JsonValue>,
}

impl CustomField {
    /// Itera sobre as opções presentes, ignorando entradas nulas
    pub fn options(&self) -> impl Iterator<Item = &FieldOption> {
        self.type_config
            .as_ref()
            .and_then(|config| config.options.as_ref())
            .into_iter()
            .flatten()
    }

    /// Compara o nome do campo (sem espaços nas bordas) com `name`
    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref().unwrap_or("").trim() == name.trim()
    }
}

impl FieldOption {
    /// Label de exibição: `label` se não vazio, senão `name`
    pub fn display_name(&self) -> Option<&str> {
        self.label
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().filter(|s| !s.is_empty()))
    }

    /// `orderindex` como inteiro; strings e floats não contam
    pub fn order_index(&self) -> Option<i64> {
        match &self.orderindex {
            Some(JsonValue::Number(n)) => n.as_i64(),
            _ => None,
        }
    }
}

fn deserialize_options<'de, D>(deserializer: D) -> Result<Option<Vec<FieldOption>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<JsonValue>>::deserialize(deserializer)?;
    Ok(raw.map(|options| {
        options
            .into_iter()
            .filter(|option| !option.is_null())
            .filter_map(|option| match serde_json::from_value::<FieldOption>(option) {
                Ok(option) => Some(option),
                Err(e) => {
                    tracing::debug!("Opção de custom field ignorada (formato inesperado): {}", e);
                    None
                }
            })
            .collect()
    }))
}
