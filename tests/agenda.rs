#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use taskflow::libs::agenda::{month_agenda, parse_month, upcoming, UPCOMING_LIMIT};
    use taskflow::libs::task::{Task, TaskPriority, TaskStatus};

    fn task(id: &str, due: Option<(i32, u32, u32)>) -> Task {
        let now = Utc::now();
        Task {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            project_id: None,
            title: format!("Task {}", id),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_month_agenda_groups_by_day() {
        let tasks = vec![
            task("a", Some((2024, 5, 20))),
            task("b", Some((2024, 5, 3))),
            task("c", Some((2024, 5, 20))),
            task("d", Some((2024, 6, 1))),
            task("e", None),
        ];

        let days = month_agenda(&tasks, 2024, 5);
        let keys: Vec<NaiveDate> = days.keys().copied().collect();
        assert_eq!(
            keys,
            vec![NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(), NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()]
        );

        let day = &days[&NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()];
        let ids: Vec<&str> = day.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_month_agenda_ignores_same_month_of_other_year() {
        let tasks = vec![task("a", Some((2023, 5, 20)))];
        assert!(month_agenda(&tasks, 2024, 5).is_empty());
    }

    #[test]
    fn test_upcoming_sorted_and_capped() {
        let tasks: Vec<Task> = (1..=7)
            .rev()
            .map(|day| task(&day.to_string(), Some((2024, 3, day))))
            .chain(std::iter::once(task("none", None)))
            .collect();

        let next = upcoming(&tasks, UPCOMING_LIMIT);
        let ids: Vec<&str> = next.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-05"), Some((2024, 5)));
        assert_eq!(parse_month(" 2024-12 "), Some((2024, 12)));
        assert_eq!(parse_month("2024-13"), None);
        assert_eq!(parse_month("May 2024"), None);
        assert_eq!(parse_month(""), None);
    }
}
