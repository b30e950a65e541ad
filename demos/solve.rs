use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use clap::Parser;
use log::info;

use swap_cascade_solver::*;

/// 問題ファイルを読み、指定した探索方式で入れ替え手順を求める。
#[derive(Debug, Parser)]
struct Cli {
    /// 探索方式 (bfs, iddfs, greedy, astar)。
    #[arg(long, default_value_t = Strategy::AStar)]
    strategy: Strategy,

    /// 結果の後に最終盤面を表示する。
    #[arg(long)]
    show_board: bool,

    puzzle_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));

    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.puzzle_file)
        .with_context(|| format!("cannot read {}", cli.puzzle_file.display()))?;
    println!("{}", text.trim());

    let start = Instant::now();

    let board: Board = text.parse()?;
    let tree = Tree::new(board);
    let solution = tree.solve(cli.strategy);

    println!("{solution}");
    println!("{}", start.elapsed().as_secs_f64());

    if !solution.reached_quota() {
        info!(
            "quota not reached: best score {} / {}",
            solution.score(),
            tree.root().state().quota()
        );
    }
    if cli.show_board {
        println!("{}", solution.node().state());
    }

    Ok(())
}
