// src/services/documento_service.rs
//
// Espelho de rateio em PDF: relatório tabular para conferência humana,
// não é um formato para reprocessamento.

use genpdf::{elements, style, Element};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::i18n::Locale,
    models::rateios::{BoletimDetalhe, StatusBoletim},
    services::rateio_service::RateioService,
};

// Rótulos do relatório nos dois idiomas que o sistema exibe
struct Rotulos {
    titulo: &'static str,
    fornecedor: &'static str,
    periodo: &'static str,
    referencia: &'static str,
    centro_custo: &'static str,
    valor: &'static str,
    percentual: &'static str,
    total: &'static str,
    rateado: &'static str,
    saldo: &'static str,
    status: &'static str,
}

fn rotulos(locale: Locale) -> Rotulos {
    match locale {
        Locale::Pt => Rotulos {
            titulo: "ESPELHO DE RATEIO",
            fornecedor: "Fornecedor",
            periodo: "Período de medição",
            referencia: "Referência",
            centro_custo: "Centro de Custo",
            valor: "Valor",
            percentual: "%",
            total: "TOTAL DO BM",
            rateado: "Total rateado",
            saldo: "Saldo a ratear",
            status: "Situação",
        },
        Locale::En => Rotulos {
            titulo: "APPORTIONMENT STATEMENT",
            fornecedor: "Supplier",
            periodo: "Measurement period",
            referencia: "Reference",
            centro_custo: "Cost Center",
            valor: "Amount",
            percentual: "%",
            total: "INVOICE TOTAL",
            rateado: "Apportioned",
            saldo: "Remaining balance",
            status: "Status",
        },
    }
}

fn rotulo_status(status: StatusBoletim, locale: Locale) -> &'static str {
    match (status, locale) {
        (StatusBoletim::Pendente, Locale::Pt) => "Pendente",
        (StatusBoletim::ParcialmenteRateado, Locale::Pt) => "Parcialmente rateado",
        (StatusBoletim::TotalmenteRateado, Locale::Pt) => "Totalmente rateado",
        (StatusBoletim::Pendente, Locale::En) => "Pending",
        (StatusBoletim::ParcialmenteRateado, Locale::En) => "Partially apportioned",
        (StatusBoletim::TotalmenteRateado, Locale::En) => "Fully apportioned",
    }
}

#[derive(Clone)]
pub struct DocumentoService {
    rateio_service: RateioService,
}

impl DocumentoService {
    pub fn new(rateio_service: RateioService) -> Self {
        Self { rateio_service }
    }

    pub async fn gerar_rateio_pdf(
        &self,
        boletim_id: Uuid,
        locale: Locale,
    ) -> Result<Vec<u8>, AppError> {
        // 1. Busca os Dados
        let detalhe: BoletimDetalhe = self.rateio_service.detalhar_boletim(boletim_id).await?;
        let r = rotulos(locale);

        // 2. Configura o PDF
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("{} {}", r.titulo, detalhe.boletim.numero));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new(format!("{} - BM {}", r.titulo, detalhe.boletim.numero))
                .styled(style::Style::new().bold().with_font_size(16)),
        );

        doc.push(elements::Break::new(1));

        doc.push(elements::Paragraph::new(format!(
            "{}: {}",
            r.fornecedor, detalhe.fornecedor_nome
        )));
        doc.push(elements::Paragraph::new(format!(
            "{}: {} - {}",
            r.periodo,
            detalhe.boletim.periodo_inicio.format("%d/%m/%Y"),
            detalhe.boletim.periodo_fim.format("%d/%m/%Y")
        )));
        doc.push(elements::Paragraph::new(format!(
            "{}: {}",
            r.referencia,
            detalhe.boletim.periodo_referencia.rotulo()
        )));
        doc.push(elements::Paragraph::new(format!(
            "{}: {}",
            r.status,
            rotulo_status(detalhe.status, locale)
        )));

        doc.push(elements::Break::new(2));

        // --- TABELA DE RATEIOS ---
        // Pesos das colunas: Centro de Custo (4), Valor (2), % (1)
        let mut table = elements::TableLayout::new(vec![4, 2, 1]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new(r.centro_custo).styled(style_bold))
            .element(elements::Paragraph::new(r.valor).styled(style_bold))
            .element(elements::Paragraph::new(r.percentual).styled(style_bold))
            .push()
            .expect("Table error");

        for rateio in &detalhe.rateios {
            table
                .row()
                .element(elements::Paragraph::new(format!("{:?}", rateio.centro_custo)))
                .element(elements::Paragraph::new(format!("R$ {:.2}", rateio.valor)))
                .element(elements::Paragraph::new(format!("{:.2}", rateio.percentual)))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAIS ---
        let mut total_paragraph = elements::Paragraph::new(format!(
            "{}: R$ {:.2}",
            r.total, detalhe.boletim.valor_total
        ));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        let mut rateado_paragraph = elements::Paragraph::new(format!(
            "{}: R$ {:.2} ({:.2}%)",
            r.rateado,
            detalhe.boletim.valor_total - detalhe.saldo,
            detalhe.percentual_rateado
        ));
        rateado_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(rateado_paragraph);

        let mut saldo_paragraph =
            elements::Paragraph::new(format!("{}: R$ {:.2}", r.saldo, detalhe.saldo));
        saldo_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(saldo_paragraph);

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}
