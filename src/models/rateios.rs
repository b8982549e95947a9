// src/models/rateios.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

// Centros de custo fixos da operação. O mesmo conjunto vale para o
// apontamento de equipamentos e para o rateio de BMs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "centro_custo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CentroCusto {
    Bordo,          // Equipe e equipamentos a bordo do navio
    Patio,          // Movimentação de pátio
    Armazem,        // Armazenagem
    Transporte,     // Transporte interno / rodoviário
    Manutencao,     // Oficina
    Administrativo, // Escritório
}

// Período de referência do BM: janelas mensais fechadas, do dia 16 de um
// mês até o dia 15 do mês seguinte. Nunca se sobrepõem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "periodo_referencia", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodoReferencia {
    JanFev,
    FevMar,
    MarAbr,
    AbrMai,
    MaiJun,
    JunJul,
    JulAgo,
    AgoSet,
    SetOut,
    OutNov,
    NovDez,
    DezJan,
}

impl PeriodoReferencia {
    // Mês em que a janela começa (1 = janeiro ... 12 = dezembro)
    pub fn mes_inicio(&self) -> u32 {
        match self {
            PeriodoReferencia::JanFev => 1,
            PeriodoReferencia::FevMar => 2,
            PeriodoReferencia::MarAbr => 3,
            PeriodoReferencia::AbrMai => 4,
            PeriodoReferencia::MaiJun => 5,
            PeriodoReferencia::JunJul => 6,
            PeriodoReferencia::JulAgo => 7,
            PeriodoReferencia::AgoSet => 8,
            PeriodoReferencia::SetOut => 9,
            PeriodoReferencia::OutNov => 10,
            PeriodoReferencia::NovDez => 11,
            PeriodoReferencia::DezJan => 12,
        }
    }

    /// Janela de datas do período para um dado ano (ano em que a janela começa).
    /// A janela DEZ_JAN termina no ano seguinte.
    pub fn janela(&self, ano: i32) -> (NaiveDate, NaiveDate) {
        let mes = self.mes_inicio();
        let (ano_fim, mes_fim) = if mes == 12 { (ano + 1, 1) } else { (ano, mes + 1) };

        // Dias 16 e 15 existem em qualquer mês, o unwrap nunca dispara
        let inicio = NaiveDate::from_ymd_opt(ano, mes, 16).unwrap();
        let fim = NaiveDate::from_ymd_opt(ano_fim, mes_fim, 15).unwrap();
        (inicio, fim)
    }

    // Rótulo exibido em telas e no PDF: "16/01 a 15/02"
    pub fn rotulo(&self) -> String {
        let mes = self.mes_inicio();
        let mes_fim = if mes == 12 { 1 } else { mes + 1 };
        format!("16/{:02} a 15/{:02}", mes, mes_fim)
    }
}

// Situação derivada do BM. Nunca é gravada: é recalculada a cada leitura
// a partir do saldo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum StatusBoletim {
    Pendente,             // saldo == total (nada rateado)
    ParcialmenteRateado,  // 0 < saldo < total
    TotalmenteRateado,    // saldo == 0
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Fornecedor {
    pub id: Uuid,

    #[schema(example = "Transportes Litoral Ltda")]
    pub nome: String,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoletimMedicao {
    pub id: Uuid,
    pub fornecedor_id: Uuid,

    #[schema(example = "BM-2026-0042")]
    pub numero: String,

    #[schema(example = "15000.00")]
    pub valor_total: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-06-16")]
    pub periodo_inicio: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2026-07-15")]
    pub periodo_fim: NaiveDate,

    pub periodo_referencia: PeriodoReferencia,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rateio {
    pub id: Uuid,
    pub boletim_id: Uuid,

    pub centro_custo: CentroCusto,

    #[schema(example = "3750.00")]
    pub valor: Decimal,

    // Percentual gravado com 2 casas. Recalculado em bloco quando o total
    // do BM é editado, para não divergir de valor / total.
    #[schema(example = "25.00")]
    pub percentual: Decimal,

    pub created_at: Option<DateTime<Utc>>,
}

// Visão completa de um BM: cabeçalho + fornecedor + rateios + derivados.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoletimDetalhe {
    #[serde(flatten)]
    pub boletim: BoletimMedicao,

    #[schema(example = "Transportes Litoral Ltda")]
    pub fornecedor_nome: String,

    pub rateios: Vec<Rateio>,

    // Derivados, calculados na leitura
    #[schema(example = "11250.00")]
    pub saldo: Decimal,
    #[schema(example = "25.00")]
    pub percentual_rateado: Decimal,
    pub status: StatusBoletim,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn janela_vai_do_dia_16_ao_15_do_mes_seguinte() {
        let (inicio, fim) = PeriodoReferencia::JunJul.janela(2026);
        assert_eq!(inicio, NaiveDate::from_ymd_opt(2026, 6, 16).unwrap());
        assert_eq!(fim, NaiveDate::from_ymd_opt(2026, 7, 15).unwrap());
    }

    #[test]
    fn janela_dez_jan_vira_o_ano() {
        let (inicio, fim) = PeriodoReferencia::DezJan.janela(2025);
        assert_eq!(inicio, NaiveDate::from_ymd_opt(2025, 12, 16).unwrap());
        assert_eq!(fim, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn janelas_nao_se_sobrepoem_ao_longo_do_ano() {
        // O fim de cada janela é exatamente a véspera do início da seguinte
        let periodos = [
            PeriodoReferencia::JanFev,
            PeriodoReferencia::FevMar,
            PeriodoReferencia::MarAbr,
            PeriodoReferencia::AbrMai,
            PeriodoReferencia::MaiJun,
            PeriodoReferencia::JunJul,
            PeriodoReferencia::JulAgo,
            PeriodoReferencia::AgoSet,
            PeriodoReferencia::SetOut,
            PeriodoReferencia::OutNov,
            PeriodoReferencia::NovDez,
            PeriodoReferencia::DezJan,
        ];

        for par in periodos.windows(2) {
            let (_, fim) = par[0].janela(2026);
            let (inicio, _) = par[1].janela(2026);
            assert_eq!(fim.succ_opt().unwrap(), inicio, "{:?} -> {:?}", par[0], par[1]);
        }
    }

    #[test]
    fn rotulo_mostra_a_janela() {
        assert_eq!(PeriodoReferencia::JanFev.rotulo(), "16/01 a 15/02");
        assert_eq!(PeriodoReferencia::DezJan.rotulo(), "16/12 a 15/01");
    }
}
