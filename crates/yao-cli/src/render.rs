//! Terminal rendering of lines and reports.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use yao_core::{Branch, LifeStage};
use yao_core::relations::harmony_element;
use yao_engine::enrich::{BranchAction, EnrichedLine, SpecialStatus};
use yao_engine::spirits::SpiritRole;
use yao_engine::{Lines, Report};

/// Print cast lines top first, the way a hexagram is drawn.
pub fn print_lines(lines: &Lines) {
    for (i, line) in lines.iter().enumerate().rev() {
        println!("  {}  {}  {}", i + 1, line.glyph(), line.chinese().dimmed());
    }
}

fn strength_cell(line: &EnrichedLine) -> String {
    let s = &line.strength;
    let score = match s.special {
        SpecialStatus::None => s.score.to_string(),
        special => format!("{} {}", s.score, special.chinese()),
    };
    format!("{} {}", s.wangshuai, score)
}

/// Month or day action, with the element a harmony forms.
fn action_cell(action: BranchAction, source: Branch, target: Branch, stage: LifeStage) -> String {
    match harmony_element(source, target) {
        Some(element) if action == BranchAction::Combine => format!("合{element} {stage}"),
        _ => format!("{action} {stage}"),
    }
}

fn role(label: &str, role: &SpiritRole) -> String {
    let at = if role.is_absent() {
        "不现".to_string()
    } else {
        role.positions
            .iter()
            .map(|p| format!("{p}爻"))
            .collect::<Vec<_>>()
            .join("、")
    };
    format!("{label} {}{} {at}", role.relation, role.element)
}

/// Print a full report as tables.
pub fn print_report(report: &Report) {
    let c = &report.classification;
    if !report.question.is_empty() {
        println!("  {} {}", "问".bold(), report.question);
    }
    println!(
        "  {} {}",
        format!("{} → 用神{}", c.category.chinese(), c.relation).bold(),
        format!("({})", report.time).dimmed()
    );
    println!(
        "  旬 {}  空 {}{}",
        report.xun, report.kong[0], report.kong[1]
    );
    println!();

    let mut names = format!("本卦 {}", report.base.to_string().bold());
    if let Some(t) = &report.transformed {
        names.push_str(&format!("  变卦 {t}"));
    }
    names.push_str(&format!("  互卦 {}", report.nuclear.name));
    println!("  {names}");
    let (upper, lower) = (report.base.upper, report.base.lower);
    let shi = report.base.shi_line();
    println!(
        "  {}",
        format!(
            "上{}{} 下{}{}  世在{}爻 {}{}  卦身{}",
            upper,
            upper.image(),
            lower,
            lower.image(),
            shi.position,
            shi.relation,
            shi.branch,
            report.base.body
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "爻", "六神", "六亲", "纳甲", "", "世应", "旺衰", "月", "日", "旬空", "变",
    ]);
    for line in report.lines.iter().rev() {
        let l = &line.line;
        let change = line
            .transform
            .as_ref()
            .map(|t| format!("→{}{} {}", t.to_branch, t.to_element, t.kind))
            .unwrap_or_default();
        table.add_row(vec![
            l.position.to_string(),
            l.spirit.to_string(),
            l.relation.to_string(),
            format!("{}{}{}", l.stem, l.branch, l.element),
            l.line_type.glyph().to_string(),
            l.marker().to_string(),
            strength_cell(line),
            action_cell(
                line.month_action,
                report.time.month_branch(),
                l.branch,
                line.month_stage.stage,
            ),
            action_cell(
                line.day_action,
                report.time.day_branch(),
                l.branch,
                line.day_stage.stage,
            ),
            line.void_state.chinese().to_string(),
            change,
        ]);
    }
    println!("{table}");
    println!();

    let s = &report.structures;
    let mut notes = Vec::new();
    if let Some(note) = &s.six_clash.note {
        notes.push(format!("六冲卦，{note}"));
    }
    if let Some(note) = &s.six_harmony.note {
        notes.push(format!("六合卦，{note}"));
    }
    notes.extend(s.bureaus.iter().map(|b| b.name.clone()));
    notes.extend(s.punishments.iter().map(|p| {
        let branches: String = p.branches.iter().map(|b| b.to_string()).collect();
        format!("{}{}", branches, p.kind.chinese())
    }));
    notes.extend(s.stem_combinations.iter().map(|sc| {
        format!(
            "{}{}{}{}合{}",
            sc.first.chinese(),
            sc.stems.0,
            sc.second.chinese(),
            sc.stems.1,
            sc.element
        )
    }));
    if !notes.is_empty() {
        println!("  {}", "格局".bold().underline());
        for note in &notes {
            println!("  - {note}");
        }
        println!();
    }

    let sp = &report.spirits;
    println!("  {}", "用神体系".bold().underline());
    for line in [
        role("用神", &sp.yong),
        role("原神", &sp.yuan),
        role("忌神", &sp.ji),
        role("仇神", &sp.chou),
    ] {
        println!("  - {line}");
    }
    for covert in &report.covert_spirits {
        let verdict = if covert.available {
            covert.reason.green()
        } else {
            covert.reason.red()
        };
        println!(
            "  - 伏神 {}{}{} 伏于{}爻 {}{} 下，{}",
            covert.relation,
            covert.stem,
            covert.branch,
            covert.position,
            covert.flying.relation,
            covert.flying.branch,
            verdict
        );
    }
    println!();

    if !report.timing.is_empty() {
        println!("  {}", "应期".bold().underline());
        for hint in &report.timing {
            println!("  - {}", hint.text);
        }
    }
}
