use std::io::BufRead as _;
use std::time::Instant;

use anyhow::Context as _;
use clap::Parser;
use itertools::Itertools as _;
use log::info;

use swap_cascade_solver::*;

/// 標準入力から問題ファイルのパスを 1 行ずつ読み、それぞれを全探索方式で解く。
///
/// 出力はタブ区切りで (パス, 方式, スコア, 目標到達, 手数, 秒数, 手順)。手順は `;` 区切り。
#[derive(Debug, Parser)]
struct Cli {
    /// 探索方式を限定する。省略時は全方式。
    #[arg(long)]
    strategy: Vec<Strategy>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));

    let cli = Cli::parse();
    let strategies = if cli.strategy.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        cli.strategy
    };

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let path = line.trim();
        if path.is_empty() {
            continue;
        }

        let text = std::fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?;
        let board: Board = text.parse().with_context(|| format!("invalid puzzle: {path}"))?;
        let tree = Tree::new(board);

        info!("Search: {path}");

        for &strategy in &strategies {
            let start = Instant::now();
            let solution = tree.solve(strategy);
            let elapsed = start.elapsed().as_secs_f64();

            println!(
                "{path}\t{strategy}\t{}\t{}\t{}\t{elapsed:.3}\t{}",
                solution.score(),
                solution.reached_quota(),
                solution.swaps().len(),
                solution.swaps().iter().join(";")
            );
        }
    }

    Ok(())
}
