//! Contagem de tarefas por produto

use std::collections::BTreeMap;

use clickup::Task;

use super::product_resolver::extract_product;

/// Produto → quantidade. Ordem de inserção não importa; a ordenação final
/// fica com o renderizador.
pub type CountTable = BTreeMap<String, usize>;

/// Critério de contagem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    /// Conta todas as tarefas recebidas (o filtro de criação já veio da busca)
    Created,
    /// Conta só tarefas fechadas dentro de `[from, to]` (limites inclusivos;
    /// `None` = sem limite daquele lado)
    Closed { from: Option<i64>, to: Option<i64> },
}

impl CountMode {
    fn accepts(&self, task: &Task) -> bool {
        match *self {
            CountMode::Created => true,
            CountMode::Closed { from, to } => match task.date_closed {
                Some(closed) => {
                    from.map_or(true, |from| closed >= from) && to.map_or(true, |to| closed <= to)
                }
                None => false,
            },
        }
    }
}

/// Conta as tarefas por produto segundo `mode`
pub fn count_by_product<'a, I>(tasks: I, field_name: &str, mode: CountMode) -> CountTable
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut counts = CountTable::new();
    for task in tasks.into_iter().filter(|task| mode.accepts(task)) {
        *counts.entry(extract_product(task, field_name)).or_insert(0) += 1;
    }
    counts
}

/// Soma de uma tabela
pub fn total(counts: &CountTable) -> usize {
    counts.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::product_resolver::NO_PRODUCT;
    use serde_json::{json, Value};

    const FIELD: &str = "⚫ Produto";

    fn task(product: Value, closed: Option<i64>) -> Task {
        serde_json::from_value(json!({
            "date_created": "1000",
            "date_closed": closed.map(|c| c.to_string()),
            "custom_fields": [{"name": FIELD, "value": product}]
        }))
        .unwrap()
    }

    #[test]
    fn test_created_counts_every_task() {
        let tasks = vec![
            task(json!("A"), None),
            task(json!("B"), None),
            task(Value::Null, None),
        ];
        let counts = count_by_product(&tasks, FIELD, CountMode::Created);

        let expected: CountTable = [("A", 1), ("B", 1), (NO_PRODUCT, 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(counts, expected);
        assert_eq!(total(&counts), tasks.len());
    }

    #[test]
    fn test_closed_bounds_are_inclusive() {
        let tasks = vec![
            task(json!("A"), Some(100)),
            task(json!("A"), Some(200)),
            task(json!("B"), Some(150)),
            task(json!("B"), Some(99)),
            task(json!("C"), Some(201)),
            task(json!("C"), None),
        ];
        let counts = count_by_product(
            &tasks,
            FIELD,
            CountMode::Closed { from: Some(100), to: Some(200) },
        );

        assert_eq!(counts.get("A"), Some(&2));
        assert_eq!(counts.get("B"), Some(&1));
        assert_eq!(counts.get("C"), None);
        assert_eq!(total(&counts), 3);
    }

    #[test]
    fn test_closed_open_bounds() {
        let tasks = vec![task(json!("A"), Some(1)), task(json!("A"), Some(i64::MAX)), task(json!("A"), None)];

        let unbounded = count_by_product(&tasks, FIELD, CountMode::Closed { from: None, to: None });
        assert_eq!(total(&unbounded), 2);

        let lower_only =
            count_by_product(&tasks, FIELD, CountMode::Closed { from: Some(2), to: None });
        assert_eq!(total(&lower_only), 1);
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let counts = count_by_product(&Vec::<Task>::new(), FIELD, CountMode::Created);
        assert!(counts.is_empty());
    }
}
