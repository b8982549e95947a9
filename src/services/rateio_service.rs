// src/services/rateio_service.rs
//
// O "livro de rateio": reparte o valor de um BM (boletim de medição) entre
// centros de custo. A regra inegociável é que a soma dos rateios de um BM
// nunca passa do valor total dele.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::RateiosRepository,
    models::rateios::{
        BoletimDetalhe, BoletimMedicao, CentroCusto, Fornecedor, PeriodoReferencia, Rateio,
        StatusBoletim,
    },
};

// =========================================================================
//  NÚCLEO PURO (sem I/O)
// =========================================================================

/// Saldo ainda não rateado do BM: total menos a soma dos rateios.
pub fn calcular_saldo(valor_total: Decimal, rateios: &[Rateio]) -> Decimal {
    let soma: Decimal = rateios.iter().map(|r| r.valor).sum();
    valor_total - soma
}

/// Percentual do total já rateado. Um BM de total zero devolve 0,
/// nunca divide por zero.
pub fn percentual_rateado(valor_total: Decimal, rateios: &[Rateio]) -> Decimal {
    if valor_total.is_zero() {
        return Decimal::ZERO;
    }
    let soma: Decimal = rateios.iter().map(|r| r.valor).sum();
    (soma / valor_total * Decimal::ONE_HUNDRED).round_dp(2)
}

pub fn valor_por_percentual(valor_total: Decimal, percentual: Decimal) -> Decimal {
    valor_total * percentual / Decimal::ONE_HUNDRED
}

pub fn percentual_por_valor(valor_total: Decimal, valor: Decimal) -> Decimal {
    if valor_total.is_zero() {
        return Decimal::ZERO;
    }
    valor / valor_total * Decimal::ONE_HUNDRED
}

/// Situação exibida nas telas. Sempre derivada do saldo, nunca gravada.
pub fn status_do_boletim(valor_total: Decimal, saldo: Decimal) -> StatusBoletim {
    if saldo.is_zero() {
        StatusBoletim::TotalmenteRateado
    } else if saldo == valor_total {
        StatusBoletim::Pendente
    } else {
        StatusBoletim::ParcialmenteRateado
    }
}

// Candidato a rateio vindo do formulário: o usuário informa o valor OU o
// percentual, e o outro é derivado.
#[derive(Debug, Clone)]
pub struct CandidatoRateio {
    pub centro_custo: CentroCusto,
    pub valor: Option<Decimal>,
    pub percentual: Option<Decimal>,
}

/// Resolve e valida um candidato contra o saldo atual do BM.
/// Devolve (valor, percentual com 2 casas) prontos para gravar.
pub fn resolver_rateio(
    valor_total: Decimal,
    saldo: Decimal,
    candidato: &CandidatoRateio,
) -> Result<(Decimal, Decimal), AppError> {
    let valor = match (candidato.valor, candidato.percentual) {
        (Some(v), _) => v,
        (None, Some(p)) => valor_por_percentual(valor_total, p).round_dp(2),
        (None, None) => return Err(AppError::RateioSemValor),
    };

    if valor <= Decimal::ZERO {
        return Err(AppError::RateioValorInvalido);
    }

    if valor > saldo {
        return Err(AppError::RateioExcedeSaldo { valor, saldo });
    }

    Ok((valor, percentual_por_valor(valor_total, valor).round_dp(2)))
}

/// Política de edição do total: recusa um total menor do que o já rateado.
/// Quem precisa reduzir o total exclui rateios antes.
pub fn validar_novo_total(novo_total: Decimal, soma_rateada: Decimal) -> Result<(), AppError> {
    if novo_total < Decimal::ZERO {
        return Err(AppError::TotalInvalido);
    }
    if novo_total < soma_rateada {
        return Err(AppError::TotalMenorQueRateado {
            total: novo_total,
            rateado: soma_rateada,
        });
    }
    Ok(())
}

// =========================================================================
//  SERVIÇO (orquestra repositório + transações)
// =========================================================================

#[derive(Clone)]
pub struct RateioService {
    repo: RateiosRepository,
    pool: PgPool,
}

impl RateioService {
    pub fn new(repo: RateiosRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // --- FORNECEDORES ---

    pub async fn criar_fornecedor(&self, nome: &str) -> Result<Fornecedor, AppError> {
        self.repo.create_fornecedor(&self.pool, nome).await
    }

    pub async fn listar_fornecedores(&self) -> Result<Vec<Fornecedor>, AppError> {
        self.repo.get_all_fornecedores(&self.pool).await
    }

    pub async fn excluir_fornecedor(&self, id: Uuid) -> Result<(), AppError> {
        let apagados = self.repo.delete_fornecedor(&self.pool, id).await?;
        if apagados == 0 {
            return Err(AppError::ResourceNotFound("Fornecedor".to_string()));
        }
        Ok(())
    }

    // --- BOLETINS ---

    #[allow(clippy::too_many_arguments)]
    pub async fn criar_boletim(
        &self,
        fornecedor_id: Uuid,
        numero: &str,
        valor_total: Decimal,
        periodo_inicio: NaiveDate,
        periodo_fim: NaiveDate,
        periodo_referencia: PeriodoReferencia,
    ) -> Result<BoletimMedicao, AppError> {
        if valor_total < Decimal::ZERO {
            return Err(AppError::TotalInvalido);
        }

        self.repo
            .create_boletim(
                &self.pool,
                fornecedor_id,
                numero,
                valor_total,
                periodo_inicio,
                periodo_fim,
                periodo_referencia,
            )
            .await
    }

    pub async fn detalhar_boletim(&self, id: Uuid) -> Result<BoletimDetalhe, AppError> {
        let boletim = self
            .repo
            .get_boletim(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("BM".to_string()))?;

        let rateios = self.repo.list_rateios(&self.pool, id).await?;
        let fornecedor_nome = self
            .repo
            .get_fornecedor_nome(&self.pool, boletim.fornecedor_id)
            .await?
            .unwrap_or_default();

        Ok(montar_detalhe(boletim, fornecedor_nome, rateios))
    }

    // Listagem com rateios embutidos: uma query para os BMs, uma para todos
    // os rateios, agrupamento em memória.
    pub async fn listar_boletins(&self) -> Result<Vec<BoletimDetalhe>, AppError> {
        let boletins = self.repo.get_all_boletins(&self.pool).await?;
        let fornecedores = self.repo.get_all_fornecedores(&self.pool).await?;

        let ids: Vec<Uuid> = boletins.iter().map(|b| b.id).collect();
        let todos_rateios = self.repo.list_rateios_de_boletins(&self.pool, &ids).await?;

        let nomes: HashMap<Uuid, String> =
            fornecedores.into_iter().map(|f| (f.id, f.nome)).collect();

        let mut por_boletim: HashMap<Uuid, Vec<Rateio>> = HashMap::new();
        for rateio in todos_rateios {
            por_boletim.entry(rateio.boletim_id).or_default().push(rateio);
        }

        let detalhes = boletins
            .into_iter()
            .map(|boletim| {
                let rateios = por_boletim.remove(&boletim.id).unwrap_or_default();
                let nome = nomes.get(&boletim.fornecedor_id).cloned().unwrap_or_default();
                montar_detalhe(boletim, nome, rateios)
            })
            .collect();

        Ok(detalhes)
    }

    /// Acrescenta um rateio a um BM. A transação tranca a linha do BM e
    /// revalida o saldo já dentro dela: duas sessões concorrentes não
    /// conseguem estourar o total.
    pub async fn adicionar_rateio(
        &self,
        boletim_id: Uuid,
        candidato: CandidatoRateio,
    ) -> Result<Rateio, AppError> {
        let mut tx = self.pool.begin().await?;

        let boletim = self
            .repo
            .get_boletim_for_update(&mut *tx, boletim_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("BM".to_string()))?;

        let existentes = self.repo.list_rateios(&mut *tx, boletim_id).await?;
        let saldo = calcular_saldo(boletim.valor_total, &existentes);

        let (valor, percentual) = resolver_rateio(boletim.valor_total, saldo, &candidato)?;

        let rateio = self
            .repo
            .insert_rateio(&mut *tx, boletim_id, candidato.centro_custo, valor, percentual)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Rateio de R$ {} ({}) lançado no BM {}",
            valor,
            percentual,
            boletim.numero
        );

        Ok(rateio)
    }

    /// Edita o total de um BM que já pode ter rateios. Um total abaixo da
    /// soma já rateada é recusado; quando aceito, o percentual gravado de
    /// cada rateio é recalculado na mesma transação.
    pub async fn editar_total(
        &self,
        boletim_id: Uuid,
        novo_total: Decimal,
    ) -> Result<BoletimDetalhe, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut boletim = self
            .repo
            .get_boletim_for_update(&mut *tx, boletim_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("BM".to_string()))?;

        let mut rateios = self.repo.list_rateios(&mut *tx, boletim_id).await?;
        let soma: Decimal = rateios.iter().map(|r| r.valor).sum();

        validar_novo_total(novo_total, soma)?;

        self.repo.update_total(&mut *tx, boletim_id, novo_total).await?;

        for rateio in rateios.iter_mut() {
            let percentual = percentual_por_valor(novo_total, rateio.valor).round_dp(2);
            self.repo.update_percentual(&mut *tx, rateio.id, percentual).await?;
            rateio.percentual = percentual;
        }

        tx.commit().await?;

        let fornecedor_nome = self
            .repo
            .get_fornecedor_nome(&self.pool, boletim.fornecedor_id)
            .await?
            .unwrap_or_default();

        boletim.valor_total = novo_total;
        Ok(montar_detalhe(boletim, fornecedor_nome, rateios))
    }

    /// Exclui um BM e seus rateios na mesma transação: o BM é dono dos
    /// rateios, nada fica órfão.
    pub async fn excluir_boletim(&self, boletim_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.repo.delete_rateios_do_boletim(&mut *tx, boletim_id).await?;
        let apagados = self.repo.delete_boletim(&mut *tx, boletim_id).await?;

        if apagados == 0 {
            return Err(AppError::ResourceNotFound("BM".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn excluir_rateio(&self, rateio_id: Uuid) -> Result<(), AppError> {
        let apagados = self.repo.delete_rateio(&self.pool, rateio_id).await?;
        if apagados == 0 {
            return Err(AppError::ResourceNotFound("Rateio".to_string()));
        }
        Ok(())
    }
}

fn montar_detalhe(
    boletim: BoletimMedicao,
    fornecedor_nome: String,
    rateios: Vec<Rateio>,
) -> BoletimDetalhe {
    let saldo = calcular_saldo(boletim.valor_total, &rateios);
    let percentual = percentual_rateado(boletim.valor_total, &rateios);
    let status = status_do_boletim(boletim.valor_total, saldo);

    BoletimDetalhe {
        boletim,
        fornecedor_nome,
        rateios,
        saldo,
        percentual_rateado: percentual,
        status,
    }
}

// =========================================================================
//  TESTES DO NÚCLEO
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rateio_com_valor(valor: &str) -> Rateio {
        Rateio {
            id: Uuid::new_v4(),
            boletim_id: Uuid::new_v4(),
            centro_custo: CentroCusto::Patio,
            valor: dec(valor),
            percentual: Decimal::ZERO,
            created_at: None,
        }
    }

    fn candidato_valor(valor: &str) -> CandidatoRateio {
        CandidatoRateio {
            centro_custo: CentroCusto::Bordo,
            valor: Some(dec(valor)),
            percentual: None,
        }
    }

    fn candidato_percentual(percentual: &str) -> CandidatoRateio {
        CandidatoRateio {
            centro_custo: CentroCusto::Bordo,
            valor: None,
            percentual: Some(dec(percentual)),
        }
    }

    #[test]
    fn saldo_e_total_menos_soma() {
        let rateios = vec![rateio_com_valor("200"), rateio_com_valor("300")];
        assert_eq!(calcular_saldo(dec("1000"), &rateios), dec("500"));
    }

    #[test]
    fn saldo_sem_rateios_e_o_total() {
        assert_eq!(calcular_saldo(dec("1000"), &[]), dec("1000"));
    }

    #[test]
    fn bm_totalmente_rateado_tem_saldo_zero() {
        // total 500, rateios 200 + 300
        let rateios = vec![rateio_com_valor("200"), rateio_com_valor("300")];
        let saldo = calcular_saldo(dec("500"), &rateios);

        assert_eq!(saldo, Decimal::ZERO);
        assert_eq!(
            status_do_boletim(dec("500"), saldo),
            StatusBoletim::TotalmenteRateado
        );
    }

    #[test]
    fn status_acompanha_o_saldo() {
        assert_eq!(status_do_boletim(dec("100"), dec("100")), StatusBoletim::Pendente);
        assert_eq!(
            status_do_boletim(dec("100"), dec("40")),
            StatusBoletim::ParcialmenteRateado
        );
        assert_eq!(
            status_do_boletim(dec("100"), dec("0")),
            StatusBoletim::TotalmenteRateado
        );
    }

    #[test]
    fn percentual_rateado_de_total_zero_e_zero() {
        // Nada de NaN nem pânico com BM de total zero
        let rateios = vec![rateio_com_valor("10")];
        assert_eq!(percentual_rateado(Decimal::ZERO, &rateios), Decimal::ZERO);
        assert_eq!(percentual_por_valor(Decimal::ZERO, dec("10")), Decimal::ZERO);
    }

    #[test]
    fn conversao_valor_percentual_ida_e_volta() {
        // Ida e volta dentro da tolerância de 2 casas do percentual gravado
        let total = dec("1000");
        for valor in ["250.00", "333.33", "1.00", "1000.00"] {
            let x = dec(valor);
            let percentual = percentual_por_valor(total, x).round_dp(2);
            let volta = valor_por_percentual(total, percentual);
            let diferenca = (volta - x).abs();
            assert!(
                diferenca <= dec("0.05"),
                "ida e volta de {} divergiu {}",
                valor,
                diferenca
            );
        }
    }

    #[test]
    fn rateio_por_percentual_deriva_o_valor() {
        // BM de 1000: 25% viram R$ 250,00
        let (valor, percentual) =
            resolver_rateio(dec("1000"), dec("1000"), &candidato_percentual("25")).unwrap();

        assert_eq!(valor, dec("250.00"));
        assert_eq!(percentual, dec("25.00"));
    }

    #[test]
    fn rateio_acima_do_saldo_e_recusado() {
        // Depois de ratear 250, o saldo é 750: lançar 800 tem que falhar
        let existentes = vec![rateio_com_valor("250.00")];
        let saldo = calcular_saldo(dec("1000"), &existentes);
        assert_eq!(saldo, dec("750.00"));

        let resultado = resolver_rateio(dec("1000"), saldo, &candidato_valor("800"));
        assert!(matches!(
            resultado,
            Err(AppError::RateioExcedeSaldo { .. })
        ));
    }

    #[test]
    fn rateio_igual_ao_saldo_e_aceito() {
        let (valor, percentual) =
            resolver_rateio(dec("1000"), dec("750"), &candidato_valor("750")).unwrap();

        assert_eq!(valor, dec("750"));
        assert_eq!(percentual, dec("75.00"));
    }

    #[test]
    fn rateio_sem_valor_nem_percentual_e_recusado() {
        let candidato = CandidatoRateio {
            centro_custo: CentroCusto::Bordo,
            valor: None,
            percentual: None,
        };
        let resultado = resolver_rateio(dec("1000"), dec("1000"), &candidato);
        assert!(matches!(resultado, Err(AppError::RateioSemValor)));
    }

    #[test]
    fn rateio_zerado_ou_negativo_e_recusado() {
        let zero = resolver_rateio(dec("1000"), dec("1000"), &candidato_valor("0"));
        assert!(matches!(zero, Err(AppError::RateioValorInvalido)));

        let negativo = resolver_rateio(dec("1000"), dec("1000"), &candidato_valor("-10"));
        assert!(matches!(negativo, Err(AppError::RateioValorInvalido)));
    }

    #[test]
    fn valor_informado_tem_precedencia_sobre_percentual() {
        let candidato = CandidatoRateio {
            centro_custo: CentroCusto::Bordo,
            valor: Some(dec("100")),
            percentual: Some(dec("99")),
        };
        let (valor, _) = resolver_rateio(dec("1000"), dec("1000"), &candidato).unwrap();
        assert_eq!(valor, dec("100"));
    }

    #[test]
    fn sequencia_de_rateios_nunca_deixa_saldo_negativo() {
        // Aplica candidatos em sequência, aceitando os válidos; o saldo
        // não pode ficar negativo em momento algum.
        let total = dec("1000");
        let mut rateios: Vec<Rateio> = Vec::new();

        for candidato in [
            candidato_percentual("25"), // aceita: 250
            candidato_valor("800"),     // recusa: saldo 750
            candidato_valor("700"),     // aceita: saldo 50
            candidato_valor("60"),      // recusa: saldo 50
            candidato_valor("50"),      // aceita: saldo 0
        ] {
            let saldo = calcular_saldo(total, &rateios);
            if let Ok((valor, percentual)) = resolver_rateio(total, saldo, &candidato) {
                let mut novo = rateio_com_valor("0");
                novo.valor = valor;
                novo.percentual = percentual;
                rateios.push(novo);
            }
            assert!(calcular_saldo(total, &rateios) >= Decimal::ZERO);
        }

        assert_eq!(rateios.len(), 3);
        assert_eq!(calcular_saldo(total, &rateios), Decimal::ZERO);
    }

    #[test]
    fn novo_total_abaixo_do_rateado_e_recusado() {
        let resultado = validar_novo_total(dec("400"), dec("500"));
        assert!(matches!(
            resultado,
            Err(AppError::TotalMenorQueRateado { .. })
        ));

        assert!(validar_novo_total(dec("500"), dec("500")).is_ok());
        assert!(validar_novo_total(dec("900"), dec("500")).is_ok());
    }

    #[test]
    fn novo_total_negativo_e_recusado() {
        assert!(matches!(
            validar_novo_total(dec("-1"), Decimal::ZERO),
            Err(AppError::TotalInvalido)
        ));
    }

    #[test]
    fn percentual_recalculado_apos_edicao_do_total() {
        // Rateio de 250 num BM de 1000 = 25%. Total editado para 2000,
        // o percentual gravado passa a 12.50.
        let percentual = percentual_por_valor(dec("2000"), dec("250")).round_dp(2);
        assert_eq!(percentual, dec("12.50"));
    }
}
