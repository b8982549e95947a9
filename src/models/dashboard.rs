// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Resumo do dia (os cards do topo do painel)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDashboard {
    pub operacoes_hoje: i64,            // Operações apontadas hoje
    pub horas_equipamentos_hoje: Decimal, // Horas de equipamento lançadas hoje
    pub boletins_abertos: i64,          // BMs com saldo a ratear
    pub vistorias_nao_conformes: i64,   // Equipamentos reprovados
}
