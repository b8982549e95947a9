// src/services/operacao_service.rs
//
// Apontamento de operações por turno. O cabeçalho e as três listas filhas
// (equipamentos, ajudantes, faltas) são gravados numa única transação:
// ou entra tudo, ou não entra nada.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OperacoesRepository,
    models::{
        operacoes::{Ajudante, EquipamentoLancado, Falta, Operacao, OperacaoDetalhe, Turno},
        rateios::CentroCusto,
    },
};

// Linhas do formulário, já validadas pelo handler
#[derive(Debug, Clone)]
pub struct NovoEquipamento {
    pub equipamento_tag: String,
    pub operador: String,
    pub centro_custo: CentroCusto,
    pub horas: Decimal,
}

#[derive(Debug, Clone)]
pub struct NovoAjudante {
    pub nome: String,
    pub funcao: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NovaFalta {
    pub nome: String,
    pub motivo: Option<String>,
}

#[derive(Clone)]
pub struct OperacaoService {
    repo: OperacoesRepository,
    pool: PgPool,
}

impl OperacaoService {
    pub fn new(repo: OperacoesRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn criar_operacao(
        &self,
        criado_por: Uuid,
        data: NaiveDate,
        turno: Turno,
        viagem_id: Option<Uuid>,
        observacoes: Option<&str>,
        equipamentos: Vec<NovoEquipamento>,
        ajudantes: Vec<NovoAjudante>,
        faltas: Vec<NovaFalta>,
    ) -> Result<OperacaoDetalhe, AppError> {
        // Horas zeradas ou negativas derrubam o formulário inteiro,
        // antes de abrir a transação
        if equipamentos.iter().any(|e| e.horas <= Decimal::ZERO) {
            return Err(AppError::HorasInvalidas);
        }

        let mut tx = self.pool.begin().await?;

        let operacao = self
            .repo
            .create_operacao(&mut *tx, data, turno, viagem_id, observacoes, criado_por)
            .await?;

        let mut equipamentos_gravados = Vec::with_capacity(equipamentos.len());
        for equipamento in &equipamentos {
            let gravado = self
                .repo
                .add_equipamento(
                    &mut *tx,
                    operacao.id,
                    &equipamento.equipamento_tag,
                    &equipamento.operador,
                    equipamento.centro_custo,
                    equipamento.horas,
                )
                .await?;
            equipamentos_gravados.push(gravado);
        }

        let mut ajudantes_gravados = Vec::with_capacity(ajudantes.len());
        for ajudante in &ajudantes {
            let gravado = self
                .repo
                .add_ajudante(&mut *tx, operacao.id, &ajudante.nome, ajudante.funcao.as_deref())
                .await?;
            ajudantes_gravados.push(gravado);
        }

        let mut faltas_gravadas = Vec::with_capacity(faltas.len());
        for falta in &faltas {
            let gravada = self
                .repo
                .add_falta(&mut *tx, operacao.id, &falta.nome, falta.motivo.as_deref())
                .await?;
            faltas_gravadas.push(gravada);
        }

        tx.commit().await?;

        tracing::info!(
            "Operação {} ({:?}) apontada com {} equipamentos",
            operacao.data,
            operacao.turno,
            equipamentos_gravados.len()
        );

        Ok(OperacaoDetalhe {
            operacao,
            equipamentos: equipamentos_gravados,
            ajudantes: ajudantes_gravados,
            faltas: faltas_gravadas,
        })
    }

    pub async fn detalhar(&self, id: Uuid) -> Result<OperacaoDetalhe, AppError> {
        let operacao = self
            .repo
            .get_operacao(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Operação".to_string()))?;

        let ids = [operacao.id];
        let equipamentos = self.repo.equipamentos_de(&self.pool, &ids).await?;
        let ajudantes = self.repo.ajudantes_de(&self.pool, &ids).await?;
        let faltas = self.repo.faltas_de(&self.pool, &ids).await?;

        Ok(OperacaoDetalhe { operacao, equipamentos, ajudantes, faltas })
    }

    // Listagem do dia com as listas filhas embutidas: três queries em lote
    // em vez de três por operação.
    pub async fn listar_por_data(&self, data: NaiveDate) -> Result<Vec<OperacaoDetalhe>, AppError> {
        let operacoes = self.repo.list_por_data(&self.pool, data).await?;
        let ids: Vec<Uuid> = operacoes.iter().map(|o| o.id).collect();

        let equipamentos = self.repo.equipamentos_de(&self.pool, &ids).await?;
        let ajudantes = self.repo.ajudantes_de(&self.pool, &ids).await?;
        let faltas = self.repo.faltas_de(&self.pool, &ids).await?;

        Ok(montar_detalhes(operacoes, equipamentos, ajudantes, faltas))
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.repo.delete_filhos(&mut *tx, id).await?;
        let apagadas = self.repo.delete_operacao(&mut *tx, id).await?;

        if apagadas == 0 {
            return Err(AppError::ResourceNotFound("Operação".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }
}

fn montar_detalhes(
    operacoes: Vec<Operacao>,
    equipamentos: Vec<EquipamentoLancado>,
    ajudantes: Vec<Ajudante>,
    faltas: Vec<Falta>,
) -> Vec<OperacaoDetalhe> {
    let mut equipamentos_por_op: HashMap<Uuid, Vec<EquipamentoLancado>> = HashMap::new();
    for equipamento in equipamentos {
        equipamentos_por_op
            .entry(equipamento.operacao_id)
            .or_default()
            .push(equipamento);
    }

    let mut ajudantes_por_op: HashMap<Uuid, Vec<Ajudante>> = HashMap::new();
    for ajudante in ajudantes {
        ajudantes_por_op.entry(ajudante.operacao_id).or_default().push(ajudante);
    }

    let mut faltas_por_op: HashMap<Uuid, Vec<Falta>> = HashMap::new();
    for falta in faltas {
        faltas_por_op.entry(falta.operacao_id).or_default().push(falta);
    }

    operacoes
        .into_iter()
        .map(|operacao| {
            let id = operacao.id;
            OperacaoDetalhe {
                operacao,
                equipamentos: equipamentos_por_op.remove(&id).unwrap_or_default(),
                ajudantes: ajudantes_por_op.remove(&id).unwrap_or_default(),
                faltas: faltas_por_op.remove(&id).unwrap_or_default(),
            }
        })
        .collect()
}
