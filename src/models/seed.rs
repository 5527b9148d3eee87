use super::{Course, CourseStatus, CreatedBy};

/// Example collection written the first time the record slot is found empty.
pub fn seed_courses() -> Vec<Course> {
    vec![
        Course {
            id: "1".to_string(),
            name: "React 基礎與實戰".to_string(),
            company: "神資".to_string(),
            department: "600-數位科技事業群".to_string(),
            objective: "提升前端開發能力".to_string(),
            start_date: "2023-11-05".to_string(),
            end_date: "2023-11-05".to_string(),
            time: "09:00-17:00".to_string(),
            duration: 7.0,
            expected_attendees: 30,
            actual_attendees: 28,
            instructor: "張志明".to_string(),
            instructor_org: "前端技術學院".to_string(),
            cost: 15000.0,
            satisfaction: 4.6,
            status: CourseStatus::Completed,
            cancellation_reason: None,
            created_by: CreatedBy::Hr,
        },
        Course {
            id: "2".to_string(),
            name: "溝通與領導力工作坊".to_string(),
            company: "新達".to_string(),
            department: "Z10-統合通訊處".to_string(),
            objective: "強化中階主管管理職能".to_string(),
            start_date: "2023-11-15".to_string(),
            end_date: "2023-11-16".to_string(),
            time: "13:00-17:00".to_string(),
            duration: 8.0,
            expected_attendees: 15,
            actual_attendees: 0,
            instructor: "李春嬌".to_string(),
            instructor_org: "企管顧問公司".to_string(),
            cost: 25000.0,
            satisfaction: 0.0,
            status: CourseStatus::Planned,
            cancellation_reason: None,
            created_by: CreatedBy::Hr,
        },
        Course {
            id: "3".to_string(),
            name: "AI 工具應用分享".to_string(),
            company: "神耀".to_string(),
            department: "QA0-智能科技中心".to_string(),
            objective: "學習使用 Generative AI 提升工作效率".to_string(),
            start_date: "2023-12-01".to_string(),
            end_date: "2023-12-01".to_string(),
            time: "12:00-13:30".to_string(),
            duration: 1.5,
            expected_attendees: 50,
            actual_attendees: 0,
            instructor: "王小明".to_string(),
            instructor_org: "內部講師".to_string(),
            cost: 0.0,
            satisfaction: 0.0,
            status: CourseStatus::Planned,
            cancellation_reason: None,
            created_by: CreatedBy::User,
        },
    ]
}
