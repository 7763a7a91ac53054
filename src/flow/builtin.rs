use super::{Step, StepId, StepKind, StepOption, TEXT_SUBMIT_VALUE};

fn choice(id: StepId, question: &str, options: Vec<StepOption>) -> Step {
    Step {
        id,
        kind: StepKind::SingleChoice,
        question: Some(question.to_string()),
        description: None,
        options,
        placeholder: None,
        cta_text: None,
        cta_link: None,
    }
}

fn result(id: StepId, question: &str, description: &str, cta_text: &str) -> Step {
    Step {
        id,
        kind: StepKind::Info,
        question: Some(question.to_string()),
        description: Some(description.to_string()),
        options: Vec::new(),
        placeholder: None,
        cta_text: Some(cta_text.to_string()),
        cta_link: Some("#".to_string()),
    }
}

fn all_to(destination: StepId, options: &[(&str, &str)]) -> Vec<StepOption> {
    options
        .iter()
        .map(|(label, value)| StepOption::new(label, value, Some(destination)))
        .collect()
}

/// Steps of the shipped funnel, in authoring order.
pub(crate) fn builtin_steps() -> Vec<Step> {
    vec![
        choice(
            StepId::Start,
            "Como posso te ajudar hoje?",
            vec![
                StepOption::new("Quero aprender marketing digital com o JP", "learn", None),
                StepOption::new(
                    "Já vivo do digital e quero escalar",
                    "scale",
                    Some(StepId::PathBArea),
                ),
                StepOption::new(
                    "Contratar o JP para um serviço",
                    "hire",
                    Some(StepId::PathCArea),
                ),
            ],
        ),
        // Learning path.
        choice(
            StepId::PathALevel,
            "Qual seu nível de conhecimento no digital?",
            vec![
                StepOption::new("Zero", "zero", None),
                StepOption::new(
                    "Não produzo conteúdo. Sei fazer algumas coisas, mas ainda não consegui fazer dinheiro",
                    "beginner",
                    None,
                ),
                StepOption::new(
                    "Produzo conteúdo, tenho audiência, mas ainda não consegui fazer dinheiro",
                    "intermediate",
                    None,
                ),
                StepOption::new(
                    "Já faturo bem e quero escalar",
                    "advanced",
                    Some(StepId::PathBArea),
                ),
            ],
        ),
        choice(
            StepId::PathAInterest,
            "Você gostaria de fazer dinheiro com o quê?",
            all_to(
                StepId::ResultElecti,
                &[
                    ("Automação e IA", "automation"),
                    ("Criação de Conteúdo", "content"),
                    ("Tráfego Pago", "ads"),
                    ("Social Media / Design", "design"),
                    ("Todas alternativas anteriores", "all"),
                ],
            ),
        ),
        // Scaling path.
        choice(
            StepId::PathBArea,
            "Você ganha dinheiro com qual área?",
            vec![
                StepOption::new(
                    "Prestação de serviço (Tráfego Pago / Social Media / Design / Editor de vídeo)",
                    "service",
                    Some(StepId::PathBServiceClients),
                ),
                StepOption::new(
                    "Infoproduto (Ebook, curso)",
                    "infoproduct",
                    Some(StepId::PathBProductRevenue),
                ),
                StepOption::new("SaaS", "saas", Some(StepId::PathBProductRevenue)),
                StepOption::new("Outros", "others", Some(StepId::PathBProductRevenue)),
            ],
        ),
        choice(
            StepId::PathBServiceClients,
            "Quantos clientes você tem hoje?",
            all_to(
                StepId::PathBServiceDifficulty,
                &[
                    ("0 a 5 clientes", "0-5"),
                    ("5 a 10 clientes", "5-10"),
                    ("10 a 20 clientes", "10-20"),
                    ("Mais de 20 clientes", "20+"),
                ],
            ),
        ),
        choice(
            StepId::PathBServiceDifficulty,
            "Qual sua maior dificuldade hoje para escalar?",
            all_to(
                StepId::ResultCalendly,
                &[
                    ("Trazer novos clientes para minha operação", "clients"),
                    ("Tenho dificuldade na hora da call", "sales_call"),
                    ("Outro", "other"),
                ],
            ),
        ),
        choice(
            StepId::PathBProductRevenue,
            "Qual sua média de faturamento mensal?",
            all_to(
                StepId::PathBProductDifficulty,
                &[
                    ("0 a 5k/mês", "0-5k"),
                    ("5k a 10k/mês", "5-10k"),
                    ("10k a 20k/mês", "10-20k"),
                    ("Mais de 20k/mês", "20k+"),
                ],
            ),
        ),
        choice(
            StepId::PathBProductDifficulty,
            "Qual sua maior dificuldade hoje para escalar?",
            all_to(
                StepId::ResultCalendly,
                &[
                    ("Não sei o que tenho que fazer para escalar", "unknown"),
                    ("Tráfego Pago", "ads"),
                    ("Automação", "automation"),
                    ("Não sei / outras opções", "other"),
                ],
            ),
        ),
        // Hiring path.
        choice(
            StepId::PathCArea,
            "Em qual área você atua?",
            all_to(
                StepId::PathCDesc,
                &[
                    ("Negócio Local", "local"),
                    ("Infoprodutor", "infoproduct"),
                    ("SaaS", "saas"),
                    ("Outro", "other"),
                ],
            ),
        ),
        Step {
            id: StepId::PathCDesc,
            kind: StepKind::TextInput,
            question: Some("Escreva uma breve descrição da sua empresa".to_string()),
            description: None,
            options: vec![StepOption::new(
                "Continuar",
                TEXT_SUBMIT_VALUE,
                Some(StepId::PathCRevenue),
            )],
            placeholder: Some("Ex: Sou um consultório odontológico...".to_string()),
            cta_text: None,
            cta_link: None,
        },
        choice(
            StepId::PathCRevenue,
            "Qual sua média de faturamento mensal?",
            all_to(
                StepId::ResultCalendly,
                &[
                    ("0 a 10k/mês", "0-10k"),
                    ("10k a 50k/mês", "10-50k"),
                    ("50k a 100k/mês", "50-100k"),
                    ("Mais de 100k/mês", "100k+"),
                ],
            ),
        ),
        result(
            StepId::ResultElecti,
            "Recomendação Perfeita",
            "Baseado no seu perfil, a melhor opção para você começar e alavancar no digital é a Electi Club.",
            "Acessar Electi Club",
        ),
        result(
            StepId::ResultCalendly,
            "Próximo Passo",
            "Você tem o perfil ideal para nossa consultoria avançada. Vamos agendar uma conversa estratégica.",
            "Agendar Consultoria",
        ),
    ]
}
