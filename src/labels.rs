//! Display labels for the stored codes.

/// Category codes offered by the bill form.
pub const BILL_CATEGORIES: [&str; 4] = ["moradia", "servicos", "impostos", "outros"];

/// Category codes offered by the transaction form.
pub const TRANSACTION_CATEGORIES: [&str; 7] = [
    "moradia",
    "servicos",
    "impostos",
    "outros",
    "fornecedores",
    "salarios",
    "vendas",
];

/// Transaction type codes.
pub const TRANSACTION_TYPES: [&str; 2] = ["income", "expense"];

/// Chart of accounts type codes.
pub const ACCOUNT_TYPES: [&str; 4] = ["ativo", "passivo", "receita", "despesa"];

/// Placeholder for values that are absent.
pub const MISSING_VALUE: &str = "—";

/// The pt-BR label for a category code, or the code itself if it is unknown.
pub fn category_label(code: &str) -> &str {
    match code {
        "moradia" => "Moradia",
        "servicos" => "Serviços",
        "impostos" => "Impostos",
        "outros" => "Outros",
        "fornecedores" => "Fornecedores",
        "salarios" => "Salários",
        "vendas" => "Vendas",
        other => other,
    }
}

pub fn transaction_type_label(code: &str) -> &str {
    match code {
        "income" => "Receita",
        "expense" => "Despesa",
        other => other,
    }
}

pub fn account_type_label(code: &str) -> &str {
    match code {
        "ativo" => "Ativo",
        "passivo" => "Passivo",
        "receita" => "Receita",
        "despesa" => "Despesa",
        other => other,
    }
}

pub fn bill_status_label(paid: bool) -> &'static str {
    if paid { "Pago" } else { "Em aberto" }
}

pub fn active_label(active: bool) -> &'static str {
    if active { "Ativo" } else { "Inativo" }
}
