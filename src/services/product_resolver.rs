//! Resolução do produto de uma tarefa
//!
//! O valor do custom field de produto pode apontar para uma opção pelo `id`
//! ou pela posição (`orderindex`), dependendo do formato da resposta.
//! As duas tabelas são montadas a cada inspeção e tentadas nessa ordem;
//! sem correspondência, vale o texto bruto do valor.
//!
//! Nunca falha: campo ausente, sem opções ou valor desconhecido degradam
//! para o texto bruto ou para [`NO_PRODUCT`].

use std::collections::HashMap;

use clickup::{CustomField, Task};
use serde_json::Value;

/// Label usado quando não há produto resolvível
pub const NO_PRODUCT: &str = "Sem produto";

/// Resolve o produto de `task` olhando o custom field `field_name`
pub fn extract_product(task: &Task, field_name: &str) -> String {
    match task.custom_fields.iter().find(|cf| cf.has_name(field_name)) {
        Some(field) => resolve_field(field),
        None => NO_PRODUCT.to_string(),
    }
}

/// Tabelas `id → label` e `orderindex → label` de um campo
struct OptionLabels {
    by_id: HashMap<String, String>,
    by_order: HashMap<String, String>,
}

impl OptionLabels {
    fn from_field(field: &CustomField) -> Self {
        let mut by_id = HashMap::new();
        let mut by_order = HashMap::new();

        for option in field.options() {
            let label = option.display_name().map(String::from);

            if let (Some(id), Some(label)) = (&option.id, &label) {
                by_id.insert(raw_text(id), label.clone());
            }
            // orderindex repetido: a última opção vence
            if let (Some(order), Some(label)) = (option.order_index(), label) {
                by_order.insert(order.to_string(), label);
            }
        }

        Self { by_id, by_order }
    }

    fn resolve(&self, value: &Value) -> String {
        let text = raw_text(value);
        if let Some(label) = self.by_id.get(&text) {
            return label.clone();
        }
        if let Some(label) = order_key(value).and_then(|key| self.by_order.get(&key)) {
            return label.clone();
        }
        text
    }
}

fn resolve_field(field: &CustomField) -> String {
    let value = match &field.value {
        None | Some(Value::Null) => return NO_PRODUCT.to_string(),
        Some(value) => value,
    };
    let labels = OptionLabels::from_field(field);

    let resolved = match value {
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| labels.resolve(item))
            .filter(|label| !label.is_empty())
            .collect::<Vec<_>>()
            .join(" / "),
        scalar => labels.resolve(scalar),
    };

    if resolved.is_empty() {
        NO_PRODUCT.to_string()
    } else {
        resolved
    }
}

/// Chave de posição: inteiros e strings casam com o `orderindex` inteiro
fn order_key(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_i64().map(|i| i.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Forma textual de um valor bruto (strings sem aspas)
fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
