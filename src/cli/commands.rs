//! Shell command handlers. Each inbound event maps onto one [`LedgerManager`] call.
//!
//! [`LedgerManager`]: crate::core::LedgerManager

use std::path::PathBuf;

use crate::{
    cli::{
        core::{CliMode, CommandError, CommandResult},
        output,
        registry::{CommandEntry, CommandRegistry},
        shell_context::ShellContext,
    },
    errors::LedgerError,
    ledger::{Transaction, TransactionKind},
    utils::build_info,
};

const DEFAULT_EXPORT_FILE: &str = "transactions.csv";

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "add",
        "Record a transaction",
        "add <description> <amount> [income|expense] [category]",
        cmd_add,
    ));
    registry.register(CommandEntry::new(
        "quick",
        "Record an expense named after its category",
        "quick <category> <amount>",
        cmd_quick,
    ));
    registry.register(CommandEntry::new(
        "list",
        "List transactions, optionally filtered",
        "list [query]",
        cmd_list,
    ));
    registry.register(CommandEntry::new(
        "search",
        "List transactions matching a description or category",
        "search <query>",
        cmd_search,
    ));
    registry.register(CommandEntry::new(
        "delete",
        "Delete the transaction at a position in the last listing",
        "delete <position>",
        cmd_delete,
    ));
    registry.register(CommandEntry::new(
        "budget",
        "Set the spending limit for a category",
        "budget <category> <limit>",
        cmd_budget,
    ));
    registry.register(CommandEntry::new(
        "budgets",
        "Show spend against every limit",
        "budgets",
        cmd_budgets,
    ));
    registry.register(CommandEntry::new(
        "summary",
        "Show total balance, daily balances and category expenses",
        "summary",
        cmd_summary,
    ));
    registry.register(CommandEntry::new(
        "streak",
        "Show the daily logging streak",
        "streak",
        cmd_streak,
    ));
    registry.register(CommandEntry::new(
        "export",
        "Write transactions to a CSV file",
        "export [path]",
        cmd_export,
    ));
    registry.register(CommandEntry::new(
        "clear",
        "Delete every transaction and budget",
        "clear [--yes]",
        cmd_clear,
    ));
    registry.register(CommandEntry::new(
        "config",
        "Show or change settings",
        "config [key value]",
        cmd_config,
    ));
    registry.register(CommandEntry::new(
        "help",
        "List commands or describe one",
        "help [command]",
        cmd_help,
    ));
    registry.register(CommandEntry::new(
        "version",
        "Show build information",
        "version",
        cmd_version,
    ));
    registry.register(CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit));
    registry.alias("quit", "exit");
    registry.alias("rm", "delete");
}

fn parse_transaction_amount(raw: &str) -> Result<f64, LedgerError> {
    raw.trim().parse::<f64>().map_err(|_| {
        LedgerError::InvalidTransactionInput(format!("`{raw}` is not a valid amount"))
    })
}

fn parse_budget_limit(raw: &str) -> Result<f64, LedgerError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| LedgerError::InvalidBudgetInput(format!("`{raw}` is not a valid limit")))
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "add <description> <amount> [income|expense] [category]";
    let (description, raw_amount) = match args {
        [description, amount, ..] => (*description, *amount),
        _ => return Err(CommandError::usage(usage)),
    };
    if args.len() > 4 {
        return Err(CommandError::usage(usage));
    }
    let amount = parse_transaction_amount(raw_amount)?;
    let kind = match args.get(2) {
        Some(raw) => raw.parse::<TransactionKind>()?,
        None => TransactionKind::Expense,
    };
    let category = args.get(3).copied();
    let outcome = context
        .manager
        .add_transaction(description, amount, kind, category)?;
    output::success(format!(
        "Recorded {} ({}) {}",
        outcome.transaction.description,
        outcome.transaction.category,
        signed_money(context, &outcome.transaction)
    ));
    if let Some(warning) = &outcome.warning {
        context.report_warning(warning);
    }
    context.view = None;
    Ok(())
}

fn cmd_quick(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [category, raw_amount] = args else {
        return Err(CommandError::usage("quick <category> <amount>"));
    };
    let amount = parse_transaction_amount(raw_amount)?;
    let outcome = context.manager.quick_add(category, amount)?;
    output::success(format!(
        "Recorded {} {}",
        outcome.transaction.category,
        signed_money(context, &outcome.transaction)
    ));
    if let Some(warning) = &outcome.warning {
        context.report_warning(warning);
    }
    context.view = None;
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    print_listing(context, &query);
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::usage("search <query>"));
    }
    cmd_list(context, args)
}

fn print_listing(context: &mut ShellContext, query: &str) {
    let rows: Vec<(uuid::Uuid, String)> = context
        .manager
        .search(query)
        .into_iter()
        .map(|txn| {
            let line = format!(
                "{} ({})  {}  {}",
                txn.description,
                txn.category,
                signed_money(context, txn),
                txn.timestamp.format("%Y-%m-%d %H:%M")
            );
            (txn.id, line)
        })
        .collect();

    if rows.is_empty() {
        output::info(if query.trim().is_empty() {
            "No transactions recorded.".to_string()
        } else {
            format!("No transactions match `{}`.", query.trim())
        });
    }
    for (position, (_, line)) in rows.iter().enumerate() {
        output::info(format!("{:>3}. {line}", position + 1));
    }
    context.view = Some(rows.into_iter().map(|(id, _)| id).collect());
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_position] = args else {
        return Err(CommandError::usage("delete <position>"));
    };
    let position: usize = raw_position.trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw_position}` is not a list position"))
    })?;
    let id = context.resolve_position(position)?;
    match context.manager.delete_transaction(id)? {
        Some(removed) => {
            context.forget_in_view(id);
            output::success(format!(
                "Deleted {} ({}) {}",
                removed.description,
                removed.category,
                signed_money(context, &removed)
            ));
        }
        None => output::info("Transaction was already removed."),
    }
    Ok(())
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [category, raw_limit] = args else {
        return Err(CommandError::usage("budget <category> <limit>"));
    };
    let limit = parse_budget_limit(raw_limit)?;
    let warnings = context.manager.set_budget(category, limit)?;
    output::success(format!(
        "Budget for {} set to {}",
        category.trim(),
        context.money(limit)
    ));
    for warning in &warnings {
        context.report_warning(warning);
    }
    Ok(())
}

fn cmd_budgets(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let statuses = context.manager.budget_statuses();
    if statuses.is_empty() {
        output::info("No budgets configured.");
        return Ok(());
    }
    output::section("Budgets");
    for status in statuses {
        let line = format!(
            "{}: {} of {} ({:.0}%), {} left",
            status.category,
            context.money(status.spent),
            context.money(status.limit),
            status.utilization_percent(),
            context.money(status.remaining)
        );
        if status.exceeded {
            output::warning(line);
        } else {
            output::info(line);
        }
    }
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.manager.summary();
    output::info(format!(
        "Total balance: {}",
        context.money(summary.total_balance)
    ));
    output::info(format!("Logging streak: {}", summary.streak));

    if !summary.daily_balances.is_empty() {
        output::section("Daily balance");
        for entry in &summary.daily_balances {
            output::info(format!("{}  {}", entry.day, context.money(entry.net)));
        }
    }
    if !summary.category_expenses.is_empty() {
        output::section("Category expenses");
        for entry in &summary.category_expenses {
            output::info(format!("{}  {}", entry.category, context.money(entry.spent)));
        }
    }
    Ok(())
}

fn cmd_streak(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(format!("Logging streak: {}", context.manager.streak()));
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [] => PathBuf::from(DEFAULT_EXPORT_FILE),
        [path] => PathBuf::from(*path),
        _ => return Err(CommandError::usage("export [path]")),
    };
    context.manager.export_csv(&path)?;
    output::success(format!(
        "Exported {} transactions to {}",
        context.manager.transactions().len(),
        path.display()
    ));
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let confirmed = match args {
        ["--yes"] | ["-y"] => true,
        [] if context.mode == CliMode::Interactive => context.confirm("Clear all data?")?,
        [] => {
            output::warning("Pass --yes to clear all data without a prompt.");
            false
        }
        _ => return Err(CommandError::usage("clear [--yes]")),
    };
    if !confirmed {
        return Ok(());
    }
    context.manager.clear_all()?;
    context.view = None;
    output::success("All data cleared");
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Configuration");
            for (key, value) in context.config.entries() {
                output::info(format!("{key} = {value}"));
            }
            output::info(format!("file: {}", context.config_manager.path().display()));
            Ok(())
        }
        [key, value @ ..] if !value.is_empty() => {
            context.config.set(key, &value.join(" "))?;
            context.config_manager.save(&context.config)?;
            output::set_color_enabled(context.config.color);
            context
                .manager
                .set_default_category(&context.config.default_category);
            if *key == "data_dir" {
                output::info("The new data directory is used from the next start.");
            }
            output::success(format!("Updated {key}"));
            Ok(())
        }
        _ => Err(CommandError::usage("config [key value]")),
    }
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = context
            .registry
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        output::info(format!("{} - {}", entry.name, entry.description));
        output::info(format!("Usage: {}", entry.usage));
        return Ok(());
    }
    output::section("Available commands");
    for entry in context.registry.list() {
        output::info(format!("{:<10} {}", entry.name, entry.description));
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(build_info::current().summary());
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.running = false;
    Ok(())
}

fn signed_money(context: &ShellContext, txn: &Transaction) -> String {
    let sign = match txn.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };
    format!("{sign}{}", context.money(txn.amount))
}
