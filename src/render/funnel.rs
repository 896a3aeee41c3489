//! Static product funnel
//!
//! Illustrative numbers only; nothing here is bound to live insights.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunnelStage {
    pub name: &'static str,
    pub value: u32,
}

pub const FUNNEL_STAGES: [FunnelStage; 4] = [
    FunnelStage { name: "Signup", value: 1000 },
    FunnelStage { name: "Onboarded", value: 650 },
    FunnelStage { name: "Activated", value: 420 },
    FunnelStage { name: "Retained", value: 260 },
];

/// Share of the first stage reached by `stage`, in 0.0..=1.0
pub fn share_of_top(stage: &FunnelStage) -> f64 {
    let top = FUNNEL_STAGES[0].value;
    if top == 0 {
        return 0.0;
    }
    stage.value as f64 / top as f64
}

/// Text rendering: one proportional bar per stage
pub fn render_funnel(width: usize) -> String {
    let label_width = FUNNEL_STAGES
        .iter()
        .map(|stage| stage.name.len())
        .max()
        .unwrap_or(0);

    FUNNEL_STAGES
        .iter()
        .map(|stage| {
            let share = share_of_top(stage);
            let bar = "█".repeat(((share * width as f64).round() as usize).max(1));
            format!(
                "{:<label_width$}  {:<width$}  {:>5} ({:>3.0}%)",
                stage.name,
                bar,
                stage.value,
                share * 100.0,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
