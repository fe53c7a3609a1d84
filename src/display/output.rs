use crate::analysis::aggregator::{AggregationTree, ModeKey, ModeStats};
use crate::analysis::stats_node::StatsNode;
use colored::*;
use std::collections::BTreeMap;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct SummaryRow {
    games: String,
    record: String,
    win_rate: String,
    kda: String,
    kills: String,
    deaths: String,
    assists: String,
    gold: String,
    damage: String,
    minions: String,
    cs_per_min: String,
    time_dead: String,
}

#[derive(Tabled)]
struct HighScoreRow {
    stat: String,
    best: String,
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "")]
    name: String,
    games: String,
    win_rate: String,
    kda: String,
    avg_kills: String,
    most_kills: String,
    most_damage: String,
}

pub fn format_kda(node: &StatsNode) -> String {
    match node.kda() {
        Some(kda) => format!("{:.2}", kda),
        None if node.games_played == 0 => "-".to_string(),
        None => "Perfect".to_string(),
    }
}

// Seconds as m:ss, or h:mm:ss past the hour.
pub fn format_duration(seconds: i64) -> String {
    let (hours, minutes, secs) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

fn summary_row(node: &StatsNode) -> SummaryRow {
    SummaryRow {
        games: node.games_played.to_string(),
        record: format!("{}W / {}L", node.wins, node.losses()),
        win_rate: format!("{:.1}%", node.win_rate() * 100.0),
        kda: format_kda(node),
        kills: node.total_kills.to_string(),
        deaths: node.total_deaths.to_string(),
        assists: node.total_assists.to_string(),
        gold: node.total_gold_earned.to_string(),
        damage: node.total_damage_dealt.to_string(),
        minions: node.total_minions.to_string(),
        cs_per_min: format!("{:.1}", node.average_minions_per_minute()),
        time_dead: format_duration(node.total_time_dead),
    }
}

fn high_score_rows(node: &StatsNode) -> Vec<HighScoreRow> {
    let row = |stat: &str, best: String| HighScoreRow {
        stat: stat.to_string(),
        best,
    };

    vec![
        row("Most kills", node.hs_kills.to_string()),
        row("Most deaths", node.hs_deaths.to_string()),
        row("Most assists", node.hs_assists.to_string()),
        row("Most gold earned", node.hs_gold_earned.to_string()),
        row("Most damage dealt", node.hs_damage_dealt.to_string()),
        row("Most vision score", node.hs_vision_score.to_string()),
        row("Most minions farmed", node.hs_minions.to_string()),
        row("Most minions per minute", format!("{:.1}", node.hs_minions_per_minute)),
        row("Longest game", format_duration(node.hs_game_duration)),
        row("Longest time dead", format_duration(node.hs_time_dead)),
    ]
}

fn breakdown_rows(children: &BTreeMap<String, StatsNode>) -> Vec<BreakdownRow> {
    let mut entries: Vec<_> = children.iter().collect();
    // Most played first, name breaks ties
    entries.sort_by(|a, b| b.1.games_played.cmp(&a.1.games_played).then(a.0.cmp(b.0)));

    entries
        .into_iter()
        .map(|(name, node)| BreakdownRow {
            name: if name.is_empty() { "(none)".to_string() } else { name.clone() },
            games: node.games_played.to_string(),
            win_rate: format!("{:.1}%", node.win_rate() * 100.0),
            kda: format_kda(node),
            avg_kills: format!("{:.1}", node.per_game(node.total_kills)),
            most_kills: node.hs_kills.to_string(),
            most_damage: node.hs_damage_dealt.to_string(),
        })
        .collect()
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

fn display_mode(key: &ModeKey, mode: &ModeStats) {
    let totals = &mode.totals;

    println!("\n{}", format!("🎮 MODE: {}", key).bold().cyan());
    println!("{}\n", "=".repeat(80).cyan());

    print_table(vec![summary_row(totals)]);

    println!("\n{}", "🏆 High Scores".bold().yellow());
    print_table(high_score_rows(totals));

    println!("\n{}", "⌨️  Abilities & Multikills".bold().yellow());
    println!(
        "  Q {} · W {} · E {} · R {} ({} casts total)",
        totals.total_spell_casts[0],
        totals.total_spell_casts[1],
        totals.total_spell_casts[2],
        totals.total_spell_casts[3],
        totals.total_ability_casts()
    );
    println!(
        "  Penta {} · Quadra {} · Triple {} · Double {}",
        totals.total_penta_kills.to_string().magenta(),
        totals.total_quadra_kills,
        totals.total_triple_kills,
        totals.total_double_kills
    );

    println!("\n{}", "🧙 Champions".bold().yellow());
    print_table(breakdown_rows(&mode.champions));

    println!("\n{}", "🗺️  Roles".bold().yellow());
    print_table(breakdown_rows(&mode.roles));
}

pub fn display_report(tree: &AggregationTree, player_name: &str) {
    println!(
        "\n{}",
        format!("📊 Match statistics for {} ", player_name).bold().cyan()
    );

    if tree.is_empty() {
        println!("{}", "No matches to report on".yellow());
        return;
    }

    for (key, mode) in tree.modes() {
        display_mode(key, mode);
    }

    println!(
        "\n{} {} matches folded, {} without the player, {} duplicates\n",
        "📈 Coverage:".bold(),
        tree.folded_count().to_string().green(),
        tree.skipped_missing_participant().to_string().yellow(),
        tree.skipped_duplicate()
    );
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats_node::MatchSample;
    use crate::api::models::ParticipantDto;

    fn node_with(kills: i64, deaths: i64, assists: i64) -> StatsNode {
        let mut node = StatsNode::new();
        node.record(&MatchSample::from_participant(
            &ParticipantDto {
                kills,
                deaths,
                assists,
                ..Default::default()
            },
            1200,
        ));
        node
    }

    #[test]
    fn test_format_kda() {
        assert_eq!(format_kda(&StatsNode::new()), "-");
        assert_eq!(format_kda(&node_with(4, 0, 2)), "Perfect");
        assert_eq!(format_kda(&node_with(4, 3, 2)), "2.00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(1265), "21:05");
        assert_eq!(format_duration(3725), "1:02:05");
    }

    #[test]
    fn test_breakdown_orders_by_games_played() {
        let mut children = BTreeMap::new();
        children.insert("Ahri".to_string(), node_with(1, 1, 1));
        let mut zed = node_with(2, 2, 2);
        zed.record(&MatchSample::from_participant(&ParticipantDto::default(), 900));
        children.insert("Zed".to_string(), zed);
        children.insert(String::new(), node_with(0, 1, 0));

        let rows = breakdown_rows(&children);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "(none)", "Ahri"]);
        assert_eq!(rows[0].games, "2");
    }
}
