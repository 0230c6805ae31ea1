use campus_nav_core::export::{DrawCommand, PageLayout, StaffRosterExporter};
use campus_nav_core::{DataSource, MockDataSource, StaffCache, StaffMember};

fn roster(len: usize) -> Vec<StaffMember> {
    (1..=len)
        .map(|n| StaffMember {
            id: format!("cs-{}", n),
            department_id: "cs".to_string(),
            name: format!("Dr. Staff {}", n),
            designation: "Assistant Professor".to_string(),
            qualification: "Ph.D".to_string(),
            email: format!("staff{}@college.edu", n),
            photo_url: None,
        })
        .collect()
}

/// A4 stretched so that exactly 18 entries fit on every page.
fn eighteen_per_page() -> PageLayout {
    PageLayout {
        bottom: 1160.0,
        ..PageLayout::a4()
    }
}

#[test]
fn test_twenty_five_entries_fill_two_pages() {
    let layout = eighteen_per_page();
    assert_eq!(layout.capacity(true), 18);
    assert_eq!(layout.capacity(false), 18);

    let doc = StaffRosterExporter::new(layout).export(Some("CS Dept"), &roster(25));
    let pages = doc.pages();
    assert_eq!(pages.len(), 2);
    assert_eq!(doc.file_name("txt"), "CS Dept-staff.txt");

    let mut next_entry = 1;
    for (n, page) in pages.iter().enumerate() {
        let texts: Vec<&str> = page
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let body = if n == 0 {
            assert_eq!(texts[0], "Staff List — CS Dept");
            &texts[1..]
        } else {
            &texts[..]
        };

        // Whole entries only: name, qualification and email stay together
        assert_eq!(body.len() % 3, 0);
        for entry in body.chunks(3) {
            assert_eq!(
                entry[0],
                format!("{}. Dr. Staff {} — Assistant Professor", next_entry, next_entry)
            );
            assert_eq!(entry[1], "Qualification: Ph.D");
            assert_eq!(entry[2], format!("Email: staff{}@college.edu", next_entry));
            next_entry += 1;
        }

        let rules = page
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(rules, body.len() / 3);
        assert_eq!(rules, if n == 0 { 18 } else { 7 });
    }
    assert_eq!(next_entry, 26);
}

#[test]
fn test_nothing_drawn_below_bottom_bound() {
    let layout = PageLayout::a4();
    let doc = StaffRosterExporter::new(layout).export(Some("IT Block"), &roster(40));

    for command in &doc.commands {
        match command {
            DrawCommand::Text { y, .. } => assert!(*y <= layout.bottom),
            DrawCommand::Line { y1, y2, .. } => {
                assert!(*y1 <= layout.bottom && *y2 <= layout.bottom)
            }
            DrawCommand::PageBreak => {}
        }
    }
    // 11 on the first page, 12 on each after
    assert_eq!(doc.page_count(), 4);
}

#[test]
fn test_exactly_full_page_adds_no_blank_page() {
    let layout = eighteen_per_page();
    let doc = StaffRosterExporter::new(layout).export(Some("CS Dept"), &roster(18));
    assert_eq!(doc.page_count(), 1);
}

#[tokio::test]
async fn test_cached_roster_is_generated_once() {
    let cache = StaffCache::new(MockDataSource::new());

    let first = cache.list_staff("3").await.unwrap();
    let second = cache.list_staff("3").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].designation, "HOD");
    assert_eq!(cache.inner().generated_rosters(), 1);
}

#[tokio::test]
async fn test_unknown_department_gets_empty_roster() {
    let cache = StaffCache::new(MockDataSource::new());

    assert!(cache.list_staff("99").await.unwrap().is_empty());
    assert!(cache.list_staff("99").await.unwrap().is_empty());
    assert_eq!(cache.inner().generated_rosters(), 0);
}
