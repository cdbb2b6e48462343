use speculate2::speculate;

speculate! {
    use serde_json::json;
    use tracker_core::db::{Collection, Database, EMPTY_QUERY_REPLY, NO_MATCH_REPLY};
    use tracker_core::models::*;
    use tracker_core::{Document, Error};

    fn setup_db() -> Database {
        let db = Database::open_memory().expect("Failed to create test database");
        db.migrate().expect("Failed to migrate test database");
        db
    }

    fn create_project(db: &Database, input: CreateProjectInput) -> Document {
        db.create_project(input.validate().expect("invalid project"))
            .expect("Failed to create project")
    }

    fn create_task(db: &Database, project: &Document, title: &str, status: &str) -> Document {
        let input = CreateTaskInput {
            status: Some(status.to_string()),
            ..CreateTaskInput::new(project.id.to_string(), title)
        };
        db.create_task(input.validate().expect("invalid task"))
            .expect("Failed to create task")
    }

    fn create_note(db: &Database, project: &Document, content: &str) -> Document {
        let input = CreateNoteInput::new(project.id.to_string(), content);
        db.create_note(input.validate().expect("invalid note"))
            .expect("Failed to create note")
    }

    fn names(response: &ChatResponse) -> Vec<String> {
        response
            .related_projects
            .iter()
            .map(|r| r.project.get_str("name").unwrap_or_default().to_string())
            .collect()
    }

    describe "projects" {
        it "stores defaults and returns the fresh document" {
            let db = setup_db();
            let project = create_project(&db, CreateProjectInput::named("Apollo"));

            assert_eq!(project.get_str("status"), Some("planned"));
            assert_eq!(project.get("progress").and_then(|v| v.as_u64()), Some(0));
            assert_eq!(project.get("tags").and_then(|v| v.as_array()).map(Vec::len), Some(0));
        }

        it "derives task and note counts" {
            let db = setup_db();
            let project = create_project(&db, CreateProjectInput::named("Apollo"));
            let other = create_project(&db, CreateProjectInput::named("Gemini"));

            create_task(&db, &project, "a", "open");
            create_task(&db, &project, "b", "open");
            create_task(&db, &project, "c", "in-progress");
            create_task(&db, &project, "d", "done");
            create_task(&db, &project, "e", "blocked");
            create_task(&db, &other, "f", "open");
            create_note(&db, &project, "first");
            create_note(&db, &project, "second");

            let found = db.get_project(&project.id.to_string()).unwrap();
            assert_eq!(found.task_counts, TaskCounts { open: 2, in_progress: 1, done: 1 });
            assert_eq!(found.notes_count, 2);
        }

        it "rejects malformed ids and reports missing ones" {
            let db = setup_db();

            assert!(matches!(db.get_project("bogus"), Err(Error::InvalidArgument(_))));
            assert!(matches!(
                db.get_project(&DocumentId::generate().to_string()),
                Err(Error::NotFound(_))
            ));
        }

        it "filters by status and respects the limit" {
            let db = setup_db();
            for i in 0..4 {
                create_project(&db, CreateProjectInput {
                    status: Some("active".into()),
                    ..CreateProjectInput::named(format!("active-{}", i))
                });
            }
            create_project(&db, CreateProjectInput::named("planned"));

            let active = db.list_projects(&ProjectFilter { status: Some(ProjectStatus::Active), limit: 3 }).unwrap();
            assert_eq!(active.len(), 3);
            assert!(active.iter().all(|p| p.project.get_str("status") == Some("active")));

            let all = db.list_projects(&ProjectFilter::default()).unwrap();
            assert_eq!(all.len(), 5);
        }
    }

    describe "tasks and notes" {
        it "require an existing project" {
            let db = setup_db();
            let missing = DocumentId::generate().to_string();

            let task = CreateTaskInput::new(missing.clone(), "orphan").validate().unwrap();
            assert!(matches!(db.create_task(task), Err(Error::NotFound(_))));

            let note = CreateNoteInput::new(missing, "orphan").validate().unwrap();
            assert!(matches!(db.create_note(note), Err(Error::NotFound(_))));
        }

        it "list by project and status" {
            let db = setup_db();
            let project = create_project(&db, CreateProjectInput::named("Apollo"));
            let other = create_project(&db, CreateProjectInput::named("Gemini"));
            create_task(&db, &project, "a", "open");
            create_task(&db, &project, "b", "done");
            create_task(&db, &other, "c", "open");

            let open = db.list_tasks(&TaskFilter {
                project_id: Some(project.id.to_string().to_uppercase()),
                status: Some(TaskStatus::Open),
                limit: 10,
            }).unwrap();
            assert_eq!(open.len(), 1);
            assert_eq!(open[0].get_str("title"), Some("a"));

            let unknown = db.list_tasks(&TaskFilter {
                project_id: Some("not-an-id".into()),
                ..TaskFilter::default()
            }).unwrap();
            assert!(unknown.is_empty());
        }

        it "list notes for one project" {
            let db = setup_db();
            let project = create_project(&db, CreateProjectInput::named("Apollo"));
            let other = create_project(&db, CreateProjectInput::named("Gemini"));
            create_note(&db, &project, "one");
            create_note(&db, &other, "two");

            let notes = db.list_notes(&NoteFilter {
                project_id: Some(project.id.to_string()),
                limit: 10,
            }).unwrap();
            assert_eq!(notes.len(), 1);
            assert_eq!(notes[0].get_str("project_id"), Some(project.id.to_string().as_str()));
        }
    }

    describe "chat" {
        it "prompts on blank input" {
            let db = setup_db();
            let response = db.chat("   \t ").unwrap();

            assert_eq!(response.reply, EMPTY_QUERY_REPLY);
            assert!(response.related_projects.is_empty());
        }

        it "reports when nothing matches" {
            let db = setup_db();
            create_project(&db, CreateProjectInput::named("Apollo"));

            let response = db.chat("zeppelin").unwrap();
            assert_eq!(response.reply, NO_MATCH_REPLY);
            assert!(response.related_projects.is_empty());
        }

        it "matches tags with empty context" {
            let db = setup_db();
            create_project(&db, CreateProjectInput {
                tags: Some(vec!["Backend".into()]),
                ..CreateProjectInput::named("Apollo")
            });

            let response = db.chat("backend").unwrap();
            assert_eq!(names(&response), vec!["Apollo"]);
            assert!(response.related_projects[0].open_tasks.is_empty());
            assert!(response.related_projects[0].recent_notes.is_empty());
        }

        it "matches substrings rather than words" {
            let db = setup_db();
            create_project(&db, CreateProjectInput::named("Project Phoenix"));

            let response = db.chat("PROJ").unwrap();
            assert_eq!(names(&response), vec!["Project Phoenix"]);
        }

        it "matches a project by its description alone" {
            let db = setup_db();
            create_project(&db, CreateProjectInput {
                description: Some("Migrate billing to the new Ledger service".into()),
                ..CreateProjectInput::named("Finance")
            });
            create_project(&db, CreateProjectInput::named("Marketing"));

            let response = db.chat("ledger").unwrap();
            assert_eq!(names(&response), vec!["Finance"]);
        }

        it "reaches a project through a task description" {
            let db = setup_db();
            let project = create_project(&db, CreateProjectInput::named("Platform"));
            create_task(&db, &project, "Unrelated title", "open");
            let input = CreateTaskInput {
                description: Some("Rotate the Vault credentials".into()),
                ..CreateTaskInput::new(project.id.to_string(), "Quarterly chores")
            };
            db.create_task(input.validate().unwrap()).unwrap();

            let response = db.chat("vault").unwrap();
            assert_eq!(names(&response), vec!["Platform"]);
            assert_eq!(response.related_projects[0].open_tasks.len(), 2);
        }

        it "skips malformed and dangling project references" {
            let db = setup_db();
            let project = create_project(&db, CreateProjectInput::named("Orchard"));
            create_task(&db, &project, "Pick kiwi", "open");
            db.insert(Collection::Task, &json!({ "project_id": "bogus", "title": "kiwi crate" })).unwrap();
            db.insert(Collection::Task, &json!({ "project_id": "65a1b2c3d4e5f60718293a4b", "title": "kiwi jam" })).unwrap();
            db.insert(Collection::Note, &json!({ "content": "kiwi with no project" })).unwrap();

            let response = db.chat("kiwi").unwrap();
            assert_eq!(names(&response), vec!["Orchard"]);
        }

        it "lists a project once when found directly and through a task" {
            let db = setup_db();
            let project = create_project(&db, CreateProjectInput::named("Search revamp"));
            create_task(&db, &project, "Tune search ranking", "open");

            let response = db.chat("search").unwrap();
            assert_eq!(names(&response), vec!["Search revamp"]);
        }

        it "orders direct hits before task hits before note hits" {
            let db = setup_db();
            let via_note = create_project(&db, CreateProjectInput::named("Gamma"));
            let via_task = create_project(&db, CreateProjectInput::named("Beta"));
            create_project(&db, CreateProjectInput::named("Alpha kiwi"));
            create_note(&db, &via_note, "kiwi season");
            create_task(&db, &via_task, "Buy kiwi", "done");

            let response = db.chat("kiwi").unwrap();
            assert_eq!(names(&response), vec!["Alpha kiwi", "Beta", "Gamma"]);
        }

        it "caps related projects at ten" {
            let db = setup_db();
            for i in 0..8 {
                create_project(&db, CreateProjectInput::named(format!("orbit {}", i)));
            }
            for i in 0..5 {
                let project = create_project(&db, CreateProjectInput::named(format!("lander {}", i)));
                create_note(&db, &project, "orbit insertion notes");
            }

            let response = db.chat("orbit").unwrap();
            assert_eq!(response.related_projects.len(), 10);
            assert!(response.reply.starts_with("I found 10 related project(s): orbit 0, orbit 1"));
        }

        it "attaches open tasks and the three newest notes" {
            let db = setup_db();
            let project = create_project(&db, CreateProjectInput::named("Rocket"));
            for i in 0..7 {
                create_task(&db, &project, &format!("open {}", i), if i % 2 == 0 { "open" } else { "in-progress" });
            }
            create_task(&db, &project, "finished", "done");
            create_task(&db, &project, "stuck", "blocked");
            for i in 0..4 {
                create_note(&db, &project, &format!("note {}", i));
            }

            let response = db.chat("rocket").unwrap();
            let related = &response.related_projects[0];

            assert_eq!(related.open_tasks.len(), 5);
            assert!(related.open_tasks.iter().all(|t| matches!(t.get_str("status"), Some("open" | "in-progress"))));

            let notes: Vec<_> = related.recent_notes.iter().map(|n| n.get_str("content").unwrap()).collect();
            assert_eq!(notes, vec!["note 3", "note 2", "note 1"]);
        }

        it "answers the website redesign scenario" {
            let db = setup_db();
            let project = create_project(&db, CreateProjectInput {
                tags: Some(vec!["urgent".into()]),
                ..CreateProjectInput::named("Website Redesign")
            });
            create_task(&db, &project, "Fix CSS", "open");
            create_task(&db, &project, "Deploy", "done");
            create_note(&db, &project, "urgent fix needed");

            let response = db.chat("urgent").unwrap();

            assert_eq!(names(&response), vec!["Website Redesign"]);
            let related = &response.related_projects[0];
            let tasks: Vec<_> = related.open_tasks.iter().map(|t| t.get_str("title").unwrap()).collect();
            assert_eq!(tasks, vec!["Fix CSS"]);
            assert_eq!(related.recent_notes.len(), 1);
            assert_eq!(related.recent_notes[0].get_str("content"), Some("urgent fix needed"));
            assert_eq!(
                response.reply,
                "I found 1 related project(s): Website Redesign. I included a few open tasks and recent notes for context."
            );
        }
    }
}
