//! Document bodies. Every term type is a list of [`Block`]s rendered by one
//! function; the blocks differ, the rendering does not.

use chrono::NaiveDate;

use super::{EmployeeSnapshot, TermType};

const SIGNATURE_LINE: &str = "_________________________________";
const BLANK_NAME: &str = "Nome: ________________";
const BLANK_DATE: &str = "___/___/____";
const BLANK_CPF: &str = "___.___.___-__";
const COLUMN: usize = 41;

/// Values substituted into a body.
pub(crate) struct Fields<'a> {
  pub employee:      &'a EmployeeSnapshot,
  pub department:    &'a str,
  pub line_items:    &'a [String],
  pub delivery_date: NaiveDate,
  pub return_date:   Option<NaiveDate>,
  pub today:         NaiveDate,
}

enum Block {
  Title(&'static str),
  /// "Eu, <nome>, CPF ..." followed by what is being declared.
  Declaration { department_prefix: &'static str, statement: [&'static str; 2] },
  ApplicantData,
  Clauses { heading: &'static str, spaced: bool, clauses: &'static [&'static str] },
  Items(&'static str),
  Text(&'static [&'static str]),
  DeliveryDate,
  UsePeriod,
  ReturnedToday,
  Signatures,
  Approvals,
}

const RESPONSIBILITY: &[Block] = &[
  Block::Title("TERMO DE RESPONSABILIDADE DE USO DE EQUIPAMENTOS DE INFORMÁTICA"),
  Block::Declaration {
    department_prefix: "",
    statement:         [
      "declaro ter recebido os equipamentos de informática abaixo relacionados",
      "para uso exclusivo nas atividades profissionais.",
    ],
  },
  Block::Clauses {
    heading: "COMPROMETO-ME A:",
    spaced:  true,
    clauses: &[
      "Utilizar os equipamentos exclusivamente para fins profissionais;",
      "Zelar pela conservação e bom funcionamento dos equipamentos;",
      "Não instalar softwares não autorizados pela empresa;",
      "Não permitir o uso dos equipamentos por terceiros;",
      "Comunicar imediatamente qualquer problema técnico ou dano;",
      "Devolver os equipamentos em perfeito estado quando solicitado;",
      "Ressarcir a empresa em caso de danos causados por mau uso ou negligência.",
    ],
  },
  Block::Items("EQUIPAMENTOS RECEBIDOS:"),
  Block::DeliveryDate,
  Block::Text(&[
    "Declaro estar ciente das responsabilidades assumidas e concordo com todos os termos acima.",
  ]),
  Block::Signatures,
];

const REQUISITION: &[Block] = &[
  Block::Title("TERMO DE REQUISIÇÃO DE ATIVOS E ACESSÓRIOS DE TI"),
  Block::ApplicantData,
  Block::Items("ITENS SOLICITADOS:"),
  Block::Text(&[
    "JUSTIFICATIVA DA SOLICITAÇÃO:",
    "Necessidade para execução das atividades profissionais.",
  ]),
  Block::UsePeriod,
  Block::Clauses {
    heading: "TERMOS E CONDIÇÕES:",
    spaced:  false,
    clauses: &[
      "Os equipamentos devem ser utilizados exclusivamente para fins profissionais;",
      "O solicitante é responsável pela guarda e conservação dos itens;",
      "Qualquer dano ou perda deve ser comunicado imediatamente ao setor de TI;",
      "Os equipamentos devem ser devolvidos na data estipulada;",
      "O não cumprimento dos termos pode resultar em cobrança pelos danos.",
    ],
  },
  Block::Approvals,
];

const RETURN: &[Block] = &[
  Block::Title("TERMO DE DEVOLUÇÃO DE EQUIPAMENTOS DE INFORMÁTICA"),
  Block::Declaration {
    department_prefix: "de ",
    statement:         [
      "declaro estar devolvendo os equipamentos de informática abaixo relacionados",
      "à empresa, em bom estado de conservação e funcionamento, salvo observações.",
    ],
  },
  Block::Items("EQUIPAMENTOS DEVOLVIDOS:"),
  Block::ReturnedToday,
  Block::Text(&[
    "Declaro que os equipamentos foram inspecionados e aceitos pelo responsável de TI.",
  ]),
  Block::Signatures,
];

fn blocks(term_type: TermType) -> &'static [Block] {
  match term_type {
    TermType::Responsibility => RESPONSIBILITY,
    TermType::Requisition => REQUISITION,
    TermType::Return => RETURN,
  }
}

/// `dd/mm/yyyy`.
pub(crate) fn format_date(date: NaiveDate) -> String { date.format("%d/%m/%Y").to_string() }

fn columns(left: &str, right: &str) -> String { format!("{left:<COLUMN$}{right}") }

impl Block {
  fn render(&self, f: &Fields<'_>, out: &mut Vec<String>) {
    let e = f.employee;
    let cpf = e.cpf.as_deref().unwrap_or(BLANK_CPF);
    match self {
      Self::Title(title) => out.push((*title).to_owned()),
      Self::Declaration { department_prefix, statement } => {
        out.push(format!(
          "Eu, {}, CPF {cpf}, funcionário(a) do departamento {department_prefix}{},",
          e.name, f.department
        ));
        out.push(format!("ocupando o cargo de {}, {}", e.position, statement[0]));
        out.push(statement[1].to_owned());
      }
      Self::ApplicantData => {
        out.push("DADOS DO SOLICITANTE:".to_owned());
        out.push(format!("Nome: {}", e.name));
        out.push(format!("CPF: {cpf}"));
        out.push(format!("Departamento: {}", f.department));
        out.push(format!("Cargo: {}", e.position));
        out.push(format!("E-mail: {}", e.email));
      }
      Self::Clauses { heading, spaced, clauses } => {
        out.push((*heading).to_owned());
        if *spaced {
          out.push(String::new());
        }
        out.extend(clauses.iter().enumerate().map(|(i, c)| format!("{}. {c}", i + 1)));
      }
      Self::Items(heading) => {
        out.push((*heading).to_owned());
        out.extend(f.line_items.iter().cloned());
      }
      Self::Text(lines) => out.extend(lines.iter().map(|l| (*l).to_owned())),
      Self::DeliveryDate => {
        out.push(format!("Data de Entrega: {}", format_date(f.delivery_date)));
      }
      Self::UsePeriod => {
        let returned = f.return_date.map(format_date).unwrap_or_else(|| BLANK_DATE.to_owned());
        out.push("PERÍODO DE USO:".to_owned());
        out.push(format!("Data de Entrega: {}", format_date(f.delivery_date)));
        out.push(format!("Data de Devolução: {returned}"));
      }
      Self::ReturnedToday => {
        out.push(format!("Data de Devolução: {}", format_date(f.today)));
      }
      Self::Signatures => {
        out.push(SIGNATURE_LINE.to_owned());
        out.push("Assinatura do Funcionário".to_owned());
        out.push(e.name.clone());
        out.push(String::new());
        out.push(SIGNATURE_LINE.to_owned());
        out.push("Assinatura do Responsável TI".to_owned());
        out.push(format!("Data: {}", format_date(f.today)));
      }
      Self::Approvals => {
        let blank_date = format!("Data: {BLANK_DATE}");
        out.push("APROVAÇÕES:".to_owned());
        out.push(columns(SIGNATURE_LINE, SIGNATURE_LINE));
        out.push(columns("Solicitante", "Supervisor Imediato"));
        out.push(columns(&e.name, BLANK_NAME));
        out.push(columns(&format!("Data: {}", format_date(f.today)), &blank_date));
        out.push(String::new());
        out.push(columns(SIGNATURE_LINE, SIGNATURE_LINE));
        out.push(columns("Responsável TI", "Gerente do Departamento"));
        out.push(columns(BLANK_NAME, BLANK_NAME));
        out.push(columns(&blank_date, &blank_date));
      }
    }
  }
}

/// Render the full body for `term_type`. Blocks are separated by one blank
/// line and the body ends with a newline.
pub(crate) fn render_body(term_type: TermType, fields: &Fields<'_>) -> String {
  let mut lines = Vec::new();
  for (i, block) in blocks(term_type).iter().enumerate() {
    if i > 0 {
      lines.push(String::new());
    }
    block.render(fields, &mut lines);
  }
  let mut body = lines.join("\n");
  body.push('\n');
  body
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  fn employee(cpf: Option<&str>) -> EmployeeSnapshot {
    EmployeeSnapshot {
      employee_id: Uuid::nil(),
      name:        "Carla Dias".into(),
      cpf:         cpf.map(str::to_owned),
      email:       "carla@corp.example".into(),
      position:    "Analista".into(),
    }
  }

  fn render(term_type: TermType, e: &EmployeeSnapshot, ret: Option<NaiveDate>) -> String {
    let items = vec!["• Mouse".to_owned()];
    render_body(term_type, &Fields {
      employee:      e,
      department:    "RH",
      line_items:    &items,
      delivery_date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
      return_date:   ret,
      today:         NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
    })
  }

  #[test]
  fn responsibility_body() {
    let body = render(TermType::Responsibility, &employee(Some("123.456.789-00")), None);
    assert!(body.starts_with("TERMO DE RESPONSABILIDADE DE USO DE EQUIPAMENTOS DE INFORMÁTICA\n\n"));
    assert!(body.contains(
      "Eu, Carla Dias, CPF 123.456.789-00, funcionário(a) do departamento RH,\n"
    ));
    assert!(body.contains("COMPROMETO-ME A:\n\n1. Utilizar"));
    assert!(body.contains("7. Ressarcir"));
    assert!(body.contains("EQUIPAMENTOS RECEBIDOS:\n• Mouse\n\nData de Entrega: 04/03/2025\n"));
    assert!(body.ends_with("Assinatura do Responsável TI\nData: 05/03/2025\n"));
    assert!(!body.lines().any(|l| l.ends_with(' ')));
  }

  #[test]
  fn requisition_body_blank_return_date() {
    let body = render(TermType::Requisition, &employee(None), None);
    assert!(body.contains("CPF: ___.___.___-__\n"));
    assert!(body.contains("PERÍODO DE USO:\nData de Entrega: 04/03/2025\nData de Devolução: ___/___/____\n"));
    assert!(body.contains("TERMOS E CONDIÇÕES:\n1. Os equipamentos"));
    assert!(body.contains(
      "Carla Dias                               Nome: ________________\n"
    ));
  }

  #[test]
  fn requisition_body_with_return_date() {
    let ret = NaiveDate::from_ymd_opt(2025, 12, 1);
    let body = render(TermType::Requisition, &employee(None), ret);
    assert!(body.contains("Data de Devolução: 01/12/2025\n"));
  }

  #[test]
  fn return_body_dates_today() {
    let body = render(TermType::Return, &employee(None), None);
    assert!(body.contains("funcionário(a) do departamento de RH,"));
    assert!(body.contains("EQUIPAMENTOS DEVOLVIDOS:\n• Mouse\n\nData de Devolução: 05/03/2025\n"));
    assert!(!body.contains("Data de Entrega"));
  }
}
