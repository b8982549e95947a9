// src/services/relatorio_service.rs
//
// Relatório de horas de equipamento: agrupa as linhas já buscadas do banco
// pela chave escolhida na tela e soma as horas, com a participação de cada
// grupo no total geral.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::OperacoesRepository,
    models::relatorios::{ChaveAgrupamento, GrupoHoras, RegistroHoras},
};

// =========================================================================
//  NÚCLEO PURO (sem I/O)
// =========================================================================

fn chave_do_registro(registro: &RegistroHoras, chave: ChaveAgrupamento) -> String {
    match chave {
        ChaveAgrupamento::Operador => registro.operador.clone(),
        ChaveAgrupamento::Equipamento => registro.equipamento_tag.clone(),
        ChaveAgrupamento::CentroCusto => format!("{:?}", registro.centro_custo),
        ChaveAgrupamento::NavioCarga => match (&registro.navio, &registro.carga) {
            (Some(navio), Some(carga)) => format!("{} / {}", navio, carga),
            _ => "Sem navio".to_string(),
        },
    }
}

/// Agrupa e soma as horas. Os grupos saem em ordem decrescente de subtotal;
/// empates ficam na ordem em que o grupo apareceu pela primeira vez.
/// Nenhum registro se perde nem é contado duas vezes: a soma dos subtotais
/// é sempre igual à soma da lista original.
pub fn agrupar_horas(registros: &[RegistroHoras], chave: ChaveAgrupamento) -> Vec<GrupoHoras> {
    let mut indice: HashMap<String, usize> = HashMap::new();
    let mut grupos: Vec<(String, Decimal)> = Vec::new();

    for registro in registros {
        let k = chave_do_registro(registro, chave);
        match indice.get(&k) {
            Some(&i) => grupos[i].1 += registro.horas,
            None => {
                indice.insert(k.clone(), grupos.len());
                grupos.push((k, registro.horas));
            }
        }
    }

    let total_geral: Decimal = grupos.iter().map(|(_, total)| *total).sum();

    let mut saida: Vec<GrupoHoras> = grupos
        .into_iter()
        .map(|(chave, total)| {
            let percentual = if total_geral.is_zero() {
                Decimal::ZERO
            } else {
                (total / total_geral * Decimal::ONE_HUNDRED).round_dp(2)
            };
            GrupoHoras { chave, total, percentual }
        })
        .collect();

    // sort_by é estável: empates preservam a ordem de inserção
    saida.sort_by(|a, b| b.total.cmp(&a.total));
    saida
}

// =========================================================================
//  SERVIÇO
// =========================================================================

#[derive(Clone)]
pub struct RelatorioService {
    repo: OperacoesRepository,
    pool: PgPool,
}

impl RelatorioService {
    pub fn new(repo: OperacoesRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn horas_equipamentos(
        &self,
        inicio: NaiveDate,
        fim: NaiveDate,
        chave: ChaveAgrupamento,
    ) -> Result<Vec<GrupoHoras>, AppError> {
        let registros = self.repo.registros_de_horas(&self.pool, inicio, fim).await?;

        tracing::debug!(
            "Relatório de horas: {} registros entre {} e {}",
            registros.len(),
            inicio,
            fim
        );

        Ok(agrupar_horas(&registros, chave))
    }
}

// =========================================================================
//  TESTES DO NÚCLEO
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rateios::CentroCusto;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn registro(operador: &str, tag: &str, navio: Option<&str>, horas: &str) -> RegistroHoras {
        RegistroHoras {
            data: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            operador: operador.to_string(),
            equipamento_tag: tag.to_string(),
            centro_custo: CentroCusto::Patio,
            navio: navio.map(|n| n.to_string()),
            carga: navio.map(|_| "Farelo de soja".to_string()),
            horas: dec(horas),
        }
    }

    #[test]
    fn subtotais_fecham_com_o_total_geral() {
        let registros = vec![
            registro("José", "RTG-07", None, "5.50"),
            registro("José", "RTG-08", None, "2.00"),
            registro("Paulo", "RTG-07", None, "6.25"),
            registro("Ana", "EH-03", None, "1.75"),
        ];

        let soma_original: Decimal = registros.iter().map(|r| r.horas).sum();

        for chave in [
            ChaveAgrupamento::Operador,
            ChaveAgrupamento::Equipamento,
            ChaveAgrupamento::CentroCusto,
            ChaveAgrupamento::NavioCarga,
        ] {
            let grupos = agrupar_horas(&registros, chave);
            let soma_grupos: Decimal = grupos.iter().map(|g| g.total).sum();
            assert_eq!(soma_grupos, soma_original, "chave {:?}", chave);
        }
    }

    #[test]
    fn percentuais_somam_cem() {
        let registros = vec![
            registro("José", "RTG-07", None, "3"),
            registro("Paulo", "RTG-08", None, "3"),
            registro("Ana", "EH-03", None, "3"),
        ];

        let grupos = agrupar_horas(&registros, ChaveAgrupamento::Operador);
        let soma_percentuais: Decimal = grupos.iter().map(|g| g.percentual).sum();

        // 3 x 33.33 = 99.99: fecha em 100 dentro do arredondamento
        let diferenca = (soma_percentuais - Decimal::ONE_HUNDRED).abs();
        assert!(diferenca <= dec("0.05"), "percentuais somaram {}", soma_percentuais);
    }

    #[test]
    fn grupos_saem_em_ordem_decrescente() {
        let registros = vec![
            registro("Ana", "EH-03", None, "1"),
            registro("José", "RTG-07", None, "10"),
            registro("Paulo", "RTG-08", None, "5"),
        ];

        let grupos = agrupar_horas(&registros, ChaveAgrupamento::Operador);
        let chaves: Vec<&str> = grupos.iter().map(|g| g.chave.as_str()).collect();
        assert_eq!(chaves, vec!["José", "Paulo", "Ana"]);
    }

    #[test]
    fn empate_preserva_ordem_de_primeira_aparicao() {
        let registros = vec![
            registro("Paulo", "RTG-08", None, "4"),
            registro("Ana", "EH-03", None, "4"),
            registro("José", "RTG-07", None, "4"),
        ];

        let grupos = agrupar_horas(&registros, ChaveAgrupamento::Operador);
        let chaves: Vec<&str> = grupos.iter().map(|g| g.chave.as_str()).collect();
        assert_eq!(chaves, vec!["Paulo", "Ana", "José"]);
    }

    #[test]
    fn lista_vazia_produz_relatorio_vazio() {
        let grupos = agrupar_horas(&[], ChaveAgrupamento::Equipamento);
        assert!(grupos.is_empty());
    }

    #[test]
    fn registros_sem_viagem_caem_no_grupo_sem_navio() {
        let registros = vec![
            registro("José", "RTG-07", Some("MV Atlantic"), "2"),
            registro("Paulo", "RTG-08", None, "3"),
            registro("Ana", "EH-03", None, "1"),
        ];

        let grupos = agrupar_horas(&registros, ChaveAgrupamento::NavioCarga);
        assert_eq!(grupos.len(), 2);
        assert_eq!(grupos[0].chave, "Sem navio");
        assert_eq!(grupos[0].total, dec("4"));
    }
}
