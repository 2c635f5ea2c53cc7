use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc, Weekday};
use regex::Regex;

use crate::model::todo::{RecurringPattern, RecurringType, Todo};
use crate::ops::path::{find_by_path, update_at_path};
use crate::ops::todo_ops::next_id;

/// Date of the next occurrence after completing on `completed_on`.
pub fn next_occurrence(pattern: &RecurringPattern, completed_on: NaiveDate) -> NaiveDate {
    let interval = pattern.interval.unwrap_or(1).max(1);
    match pattern.kind {
        RecurringType::Daily | RecurringType::Custom => add_days(completed_on, interval as u64),
        RecurringType::Weekdays => {
            let mut date = add_days(completed_on, 1);
            while is_weekend(date) {
                date = add_days(date, 1);
            }
            date
        }
        RecurringType::Weekly => {
            if let Some(days) = &pattern.days_of_week
                && !days.is_empty()
            {
                let mut date = add_days(completed_on, 1);
                for _ in 0..7 {
                    if days.contains(&day_of_week(date)) {
                        return date;
                    }
                    date = add_days(date, 1);
                }
            }
            add_days(completed_on, 7 * interval as u64)
        }
        RecurringType::Monthly => {
            let shifted = completed_on
                .checked_add_months(Months::new(interval))
                .unwrap_or(completed_on);
            let target = pattern.day_of_month.unwrap_or(1);
            let last = last_day_of_month(shifted.year(), shifted.month());
            NaiveDate::from_ymd_opt(shifted.year(), shifted.month(), target.min(last))
                .unwrap_or(shifted)
        }
    }
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 0 = Sunday .. 6 = Saturday, the stored convention.
fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Build the auto-generated sibling for a completed recurring todo: fresh
/// id, incomplete, no subtasks, chained back to the recurring root, due on
/// the next occurrence. The pattern travels with the instance, with its
/// `next_due_date` advanced; focus priority never carries over.
pub fn recurring_instance(
    original: &Todo,
    fresh_id: i64,
    next_due: NaiveDate,
    now: DateTime<Utc>,
) -> Todo {
    let mut instance = Todo::new(fresh_id, &original.text, now);
    instance.due_date = Some(next_due);
    instance.difficulty = original.difficulty;
    instance.parent_recurring_id = original.parent_recurring_id.or(Some(original.id));
    instance.is_recurring = true;
    instance.recurring_pattern = original.recurring_pattern.clone().map(|mut p| {
        p.next_due_date = Some(next_due);
        p
    });
    instance
}

/// Insert exactly one recurring instance right after the node at
/// `parent_path`/`id`, provided it is completed and carries a live pattern.
/// The caller fires this only on the incomplete→complete transition.
pub fn expand_on_completion(
    mut todos: Vec<Todo>,
    id: i64,
    parent_path: &[i64],
    completed_on: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<Todo> {
    let mut path = parent_path.to_vec();
    path.push(id);
    let Some(original) = find_by_path(&todos, &path) else {
        return todos;
    };
    if !original.completed || !original.is_recurring {
        return todos;
    }
    let Some(pattern) = &original.recurring_pattern else {
        return todos;
    };
    let next_due = next_occurrence(pattern, completed_on);
    let instance = recurring_instance(original, next_id(&todos), next_due, now);

    if parent_path.is_empty() {
        if let Some(idx) = todos.iter().position(|t| t.id == id) {
            todos.insert(idx + 1, instance);
        }
        return todos;
    }
    update_at_path(todos, parent_path, |parent| {
        if let Some(idx) = parent.subtasks.iter().position(|t| t.id == id) {
            parent.subtasks.insert(idx + 1, instance);
        }
    })
}

/// Parse a recurrence spec from the CLI: `daily`, `weekdays`, a comma list
/// of weekday names (`mon,thu`), `monthly:15`, or `every:3` (days).
/// `next_due_date` is seeded relative to `today`.
pub fn parse_pattern(spec: &str, today: NaiveDate) -> Option<RecurringPattern> {
    let spec = spec.trim().to_ascii_lowercase();
    match spec.as_str() {
        "daily" => {
            return Some(RecurringPattern {
                kind: RecurringType::Daily,
                interval: Some(1),
                days_of_week: None,
                day_of_month: None,
                next_due_date: Some(add_days(today, 1)),
            });
        }
        "weekdays" => {
            let mut next = add_days(today, 1);
            while is_weekend(next) {
                next = add_days(next, 1);
            }
            return Some(RecurringPattern {
                kind: RecurringType::Weekdays,
                interval: None,
                days_of_week: Some(vec![1, 2, 3, 4, 5]),
                day_of_month: None,
                next_due_date: Some(next),
            });
        }
        _ => {}
    }

    let monthly = Regex::new(r"^monthly:(\d{1,2})$").ok()?;
    if let Some(caps) = monthly.captures(&spec) {
        let day: u32 = caps[1].parse().ok()?;
        if day == 0 || day > 31 {
            return None;
        }
        return Some(RecurringPattern {
            kind: RecurringType::Monthly,
            interval: Some(1),
            days_of_week: None,
            day_of_month: Some(day),
            next_due_date: Some(first_monthly(today, day)),
        });
    }

    let every = Regex::new(r"^every:(\d+)$").ok()?;
    if let Some(caps) = every.captures(&spec) {
        let interval: u32 = caps[1].parse().ok()?;
        if interval == 0 {
            return None;
        }
        return Some(RecurringPattern {
            kind: RecurringType::Custom,
            interval: Some(interval),
            days_of_week: None,
            day_of_month: None,
            next_due_date: Some(add_days(today, interval as u64)),
        });
    }

    // comma-separated weekday names → weekly
    let days: Option<Vec<u8>> = spec.split(',').map(|s| parse_day_name(s.trim())).collect();
    let days = days?;
    if days.is_empty() {
        return None;
    }
    let mut next = add_days(today, 1);
    for _ in 0..7 {
        if days.contains(&day_of_week(next)) {
            break;
        }
        next = add_days(next, 1);
    }
    Some(RecurringPattern {
        kind: RecurringType::Weekly,
        interval: Some(1),
        days_of_week: Some(days),
        day_of_month: None,
        next_due_date: Some(next),
    })
}

fn parse_day_name(s: &str) -> Option<u8> {
    match s {
        "sun" | "sunday" => Some(0),
        "mon" | "monday" => Some(1),
        "tue" | "tuesday" => Some(2),
        "wed" | "wednesday" => Some(3),
        "thu" | "thursday" => Some(4),
        "fri" | "friday" => Some(5),
        "sat" | "saturday" => Some(6),
        _ => None,
    }
}

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// First upcoming `day` of the month: this month if still ahead, else next
/// month, clamped to the month's last day.
fn first_monthly(today: NaiveDate, day: u32) -> NaiveDate {
    let candidate = |year: i32, month: u32| {
        let clamped = day.min(last_day_of_month(year, month));
        NaiveDate::from_ymd_opt(year, month, clamped)
    };
    if let Some(date) = candidate(today.year(), today.month())
        && date > today
    {
        return date;
    }
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    candidate(year, month).unwrap_or(today)
}

/// Human-readable summary for list output.
pub fn display_pattern(pattern: &RecurringPattern) -> String {
    match pattern.kind {
        RecurringType::Daily => "daily".to_string(),
        RecurringType::Weekdays => "weekdays".to_string(),
        RecurringType::Weekly => {
            let names: Vec<&str> = pattern
                .days_of_week
                .as_deref()
                .unwrap_or_default()
                .iter()
                .filter_map(|d| DAY_NAMES.get(*d as usize).copied())
                .collect();
            format!("weekly on {}", names.join(", "))
        }
        RecurringType::Monthly => format!("monthly on day {}", pattern.day_of_month.unwrap_or(1)),
        RecurringType::Custom => format!("every {} days", pattern.interval.unwrap_or(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::path::find_by_path;
    use crate::ops::todo_ops::toggle_completion;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn now() -> DateTime<Utc> {
        "2024-01-10T09:00:00Z".parse().unwrap()
    }

    fn daily() -> RecurringPattern {
        RecurringPattern {
            kind: RecurringType::Daily,
            interval: Some(1),
            days_of_week: None,
            day_of_month: None,
            next_due_date: None,
        }
    }

    #[test]
    fn daily_advances_by_interval() {
        assert_eq!(next_occurrence(&daily(), date("2024-01-10")), date("2024-01-11"));

        let mut every3 = daily();
        every3.interval = Some(3);
        assert_eq!(next_occurrence(&every3, date("2024-01-10")), date("2024-01-13"));
    }

    #[test]
    fn weekdays_skip_the_weekend() {
        let pattern = RecurringPattern {
            kind: RecurringType::Weekdays,
            interval: None,
            days_of_week: Some(vec![1, 2, 3, 4, 5]),
            day_of_month: None,
            next_due_date: None,
        };
        // 2024-01-12 is a Friday → next is Monday the 15th
        assert_eq!(next_occurrence(&pattern, date("2024-01-12")), date("2024-01-15"));
        // mid-week just advances a day
        assert_eq!(next_occurrence(&pattern, date("2024-01-10")), date("2024-01-11"));
    }

    #[test]
    fn weekly_finds_next_listed_day() {
        let pattern = RecurringPattern {
            kind: RecurringType::Weekly,
            interval: Some(1),
            days_of_week: Some(vec![1, 4]), // Mon, Thu
            day_of_month: None,
            next_due_date: None,
        };
        // Wednesday the 10th → Thursday the 11th
        assert_eq!(next_occurrence(&pattern, date("2024-01-10")), date("2024-01-11"));
        // Thursday the 11th → Monday the 15th
        assert_eq!(next_occurrence(&pattern, date("2024-01-11")), date("2024-01-15"));
    }

    #[test]
    fn weekly_without_days_falls_back_to_interval_weeks() {
        let pattern = RecurringPattern {
            kind: RecurringType::Weekly,
            interval: Some(2),
            days_of_week: None,
            day_of_month: None,
            next_due_date: None,
        };
        assert_eq!(next_occurrence(&pattern, date("2024-01-10")), date("2024-01-24"));
    }

    #[test]
    fn monthly_clamps_to_month_end() {
        let pattern = RecurringPattern {
            kind: RecurringType::Monthly,
            interval: Some(1),
            days_of_week: None,
            day_of_month: Some(31),
            next_due_date: None,
        };
        // January 31st + 1 month → Feb 29 (2024 is a leap year)
        assert_eq!(next_occurrence(&pattern, date("2024-01-31")), date("2024-02-29"));
        assert_eq!(next_occurrence(&pattern, date("2023-01-31")), date("2023-02-28"));
        // and lands back on the 31st when the month allows
        assert_eq!(next_occurrence(&pattern, date("2024-02-29")), date("2024-03-31"));
    }

    #[test]
    fn custom_advances_by_days() {
        let pattern = RecurringPattern {
            kind: RecurringType::Custom,
            interval: Some(10),
            days_of_week: None,
            day_of_month: None,
            next_due_date: None,
        };
        assert_eq!(next_occurrence(&pattern, date("2024-01-10")), date("2024-01-20"));
    }

    fn recurring_todo(id: i64) -> Todo {
        let mut todo = Todo::new(id, "water plants", now());
        todo.due_date = Some(date("2024-01-10"));
        todo.is_recurring = true;
        todo.recurring_pattern = Some(daily());
        todo
    }

    #[test]
    fn instance_fields() {
        let original = recurring_todo(5);
        let instance = recurring_instance(&original, 9, date("2024-01-11"), now());

        assert_eq!(instance.id, 9);
        assert_eq!(instance.text, "water plants");
        assert!(!instance.completed);
        assert!(instance.subtasks.is_empty());
        assert_eq!(instance.due_date, Some(date("2024-01-11")));
        assert_eq!(instance.parent_recurring_id, Some(5));
        assert!(instance.is_recurring);
        assert_eq!(
            instance.recurring_pattern.as_ref().unwrap().next_due_date,
            Some(date("2024-01-11"))
        );
        assert!(instance.focus_priority.is_none());
    }

    #[test]
    fn instance_threads_the_chain_root() {
        let mut generated = recurring_todo(9);
        generated.parent_recurring_id = Some(5);
        let next = recurring_instance(&generated, 14, date("2024-01-12"), now());
        assert_eq!(next.parent_recurring_id, Some(5), "chain root, not the immediate parent");
    }

    #[test]
    fn expand_inserts_one_sibling_after_the_original() {
        let todos = vec![recurring_todo(1), Todo::new(2, "other", now())];
        let todos = toggle_completion(todos, 1, &[], now());
        let todos = expand_on_completion(todos, 1, &[], date("2024-01-10"), now());

        assert_eq!(todos.len(), 3);
        let instance = &todos[1];
        assert_eq!(instance.due_date, Some(date("2024-01-11")));
        assert!(!instance.completed);
        assert!(instance.subtasks.is_empty());
        assert_eq!(instance.parent_recurring_id, Some(1));
        assert_eq!(todos[2].id, 2);
    }

    #[test]
    fn expand_requires_completion_and_a_live_pattern() {
        // not completed → nothing happens
        let todos = vec![recurring_todo(1)];
        let after = expand_on_completion(todos.clone(), 1, &[], date("2024-01-10"), now());
        assert_eq!(after, todos);

        // completed but not recurring → nothing happens
        let plain = vec![Todo::new(1, "plain", now())];
        let plain = toggle_completion(plain, 1, &[], now());
        let after = expand_on_completion(plain.clone(), 1, &[], date("2024-01-10"), now());
        assert_eq!(after, plain);
    }

    #[test]
    fn expand_subtasks_are_not_copied() {
        let mut todo = recurring_todo(1);
        todo.subtasks = vec![Todo::new(2, "step", now())];
        let todos = toggle_completion(vec![todo], 1, &[], now());
        let todos = expand_on_completion(todos, 1, &[], date("2024-01-10"), now());
        assert_eq!(todos.len(), 2);
        assert!(todos[1].subtasks.is_empty());
    }

    #[test]
    fn expand_nested_inserts_under_the_same_parent() {
        let mut parent = Todo::new(1, "routines", now());
        parent.subtasks = vec![recurring_todo(2), Todo::new(3, "last", now())];
        let todos = toggle_completion(vec![parent], 2, &[1], now());
        let todos = expand_on_completion(todos, 2, &[1], date("2024-01-10"), now());

        let parent = find_by_path(&todos, &[1]).unwrap();
        assert_eq!(parent.subtasks.len(), 3);
        assert_eq!(parent.subtasks[0].id, 2);
        assert_eq!(parent.subtasks[1].parent_recurring_id, Some(2));
        assert_eq!(parent.subtasks[2].id, 3);
    }

    #[test]
    fn parse_daily_and_weekdays() {
        let p = parse_pattern("daily", date("2024-01-10")).unwrap();
        assert_eq!(p.kind, RecurringType::Daily);
        assert_eq!(p.next_due_date, Some(date("2024-01-11")));

        // Friday the 12th → Monday the 15th
        let p = parse_pattern("weekdays", date("2024-01-12")).unwrap();
        assert_eq!(p.kind, RecurringType::Weekdays);
        assert_eq!(p.days_of_week, Some(vec![1, 2, 3, 4, 5]));
        assert_eq!(p.next_due_date, Some(date("2024-01-15")));
    }

    #[test]
    fn parse_weekly_day_names() {
        let p = parse_pattern("mon,thu", date("2024-01-10")).unwrap();
        assert_eq!(p.kind, RecurringType::Weekly);
        assert_eq!(p.days_of_week, Some(vec![1, 4]));
        assert_eq!(p.next_due_date, Some(date("2024-01-11")));
        assert!(parse_pattern("mon,funday", date("2024-01-10")).is_none());
    }

    #[test]
    fn parse_monthly_and_custom() {
        let p = parse_pattern("monthly:15", date("2024-01-10")).unwrap();
        assert_eq!(p.kind, RecurringType::Monthly);
        assert_eq!(p.day_of_month, Some(15));
        assert_eq!(p.next_due_date, Some(date("2024-01-15")));

        // day already past this month → next month
        let p = parse_pattern("monthly:5", date("2024-01-10")).unwrap();
        assert_eq!(p.next_due_date, Some(date("2024-02-05")));

        let p = parse_pattern("every:3", date("2024-01-10")).unwrap();
        assert_eq!(p.kind, RecurringType::Custom);
        assert_eq!(p.interval, Some(3));
        assert_eq!(p.next_due_date, Some(date("2024-01-13")));

        assert!(parse_pattern("every:0", date("2024-01-10")).is_none());
        assert!(parse_pattern("fortnightly", date("2024-01-10")).is_none());
    }

    #[test]
    fn display_forms() {
        assert_eq!(display_pattern(&daily()), "daily");
        let p = parse_pattern("mon,wed", date("2024-01-10")).unwrap();
        assert_eq!(display_pattern(&p), "weekly on Mon, Wed");
        let p = parse_pattern("monthly:15", date("2024-01-10")).unwrap();
        assert_eq!(display_pattern(&p), "monthly on day 15");
        let p = parse_pattern("every:3", date("2024-01-10")).unwrap();
        assert_eq!(display_pattern(&p), "every 3 days");
    }
}
