//! Renderização do relatório: tabela de largura fixa + linha de totais
//!
//! Linhas = união dos produtos de todas as colunas. Ordenação decrescente
//! pelas contagens das colunas de prioridade (na ordem dada) e, no empate,
//! alfabética crescente pelo texto exibido. Mesma entrada, mesma saída byte a byte.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use super::aggregator::{total, CountTable};
use super::product_resolver::NO_PRODUCT;

pub const PRODUCT_HEADER: &str = "Produto";
const SUMMARY_SEPARATOR: &str = "  |  ";
/// Espaço extra à esquerda das colunas numéricas
const NUMERIC_PADDING: usize = 1;

/// Uma coluna do relatório
#[derive(Debug, Clone)]
pub struct ReportColumn {
    /// Cabeçalho na tabela ("Hoje")
    pub header: String,
    /// Rótulo na linha de totais ("📅 Hoje")
    pub summary_label: String,
    pub counts: CountTable,
}

impl ReportColumn {
    pub fn new(header: &str, summary_label: &str, counts: CountTable) -> Self {
        Self {
            header: header.to_string(),
            summary_label: summary_label.to_string(),
            counts,
        }
    }

    fn count(&self, product: &str) -> usize {
        self.counts.get(product).copied().unwrap_or(0)
    }
}

/// Relatório pronto para publicação
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// "📅 Ontem: 3  |  📅 Hoje: 5  |  ..."
    pub summary: String,
    /// Tabela já envolvida em bloco monoespaçado
    pub table: String,
}

/// Monta o relatório. `sort_priority` são índices em `columns`; índices
/// fora do intervalo contam como zero.
pub fn render_report(columns: &[ReportColumn], sort_priority: &[usize]) -> Report {
    Report {
        summary: render_summary(columns),
        table: render_table(columns, sort_priority),
    }
}

pub fn render_summary(columns: &[ReportColumn]) -> String {
    columns
        .iter()
        .map(|column| format!("{}: {}", column.summary_label, total(&column.counts)))
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

pub fn render_table(columns: &[ReportColumn], sort_priority: &[usize]) -> String {
    let products = sorted_products(columns, sort_priority);

    let product_width = products
        .iter()
        .map(|p| display_name(p).chars().count())
        .chain(std::iter::once(PRODUCT_HEADER.chars().count()))
        .max()
        .unwrap_or(0);

    let widths: Vec<usize> = columns
        .iter()
        .map(|column| {
            products
                .iter()
                .map(|p| column.count(p).to_string().len())
                .chain(std::iter::once(column.header.chars().count()))
                .max()
                .unwrap_or(0)
                + NUMERIC_PADDING
        })
        .collect();

    let mut lines = Vec::with_capacity(products.len() + 2);

    let mut header = format!("{:<width$}", PRODUCT_HEADER, width = product_width);
    for (column, width) in columns.iter().zip(&widths) {
        header.push_str(&format!(" {:>width$}", column.header, width = *width));
    }
    lines.push(header);

    let mut separator = "-".repeat(product_width);
    for width in &widths {
        separator.push(' ');
        separator.push_str(&"-".repeat(*width));
    }
    lines.push(separator);

    for product in &products {
        let mut line = format!("{:<width$}", display_name(product), width = product_width);
        for (column, width) in columns.iter().zip(&widths) {
            line.push_str(&format!(" {:>width$}", column.count(product), width = *width));
        }
        lines.push(line);
    }

    format!("```\n{}\n```", lines.join("\n"))
}

fn display_name(product: &str) -> &str {
    if product.is_empty() {
        NO_PRODUCT
    } else {
        product
    }
}

fn sorted_products<'a>(columns: &'a [ReportColumn], sort_priority: &[usize]) -> Vec<&'a str> {
    let union: BTreeSet<&str> = columns
        .iter()
        .flat_map(|column| column.counts.keys().map(String::as_str))
        .collect();

    let mut products: Vec<&str> = union.into_iter().collect();
    products.sort_by_cached_key(|product| {
        let counts: Vec<Reverse<usize>> = sort_priority
            .iter()
            .map(|&index| Reverse(columns.get(index).map_or(0, |c| c.count(product))))
            .collect();
        (counts, display_name(product).to_string())
    });
    products
}
