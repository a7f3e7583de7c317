use minijinja::{Environment, Value};

/// All page templates, compiled into the binary and parsed once at startup.
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Self {
        let mut env = Environment::new();
        for (name, source) in [
            ("base.html", include_str!("templates/base.html")),
            ("home.html", include_str!("templates/home.html")),
            ("task_list.html", include_str!("templates/task_list.html")),
            ("task_form.html", include_str!("templates/task_form.html")),
        ] {
            env.add_template(name, source)
                .expect("embedded template must parse");
        }
        Self { env }
    }

    pub fn render(&self, name: &str, ctx: Value) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

impl Default for Pages {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn all_templates_parse() {
        let pages = Pages::new();
        let html = pages.render("home.html", context! {}).unwrap();
        assert!(html.contains("/tasks"));
    }

    #[test]
    fn list_branches_on_missing_image() {
        let pages = Pages::new();
        let html = pages
            .render(
                "task_list.html",
                context! {
                    tasks => vec![context! {
                        id => 1,
                        title => "A task",
                        detail => "details",
                        image_url => "",
                        has_image => false,
                        is_complete => false,
                        created => "2024-03-01",
                        updated => "-",
                    }],
                },
            )
            .unwrap();
        assert!(html.contains("no image"));
        assert!(!html.contains("<img src=\"\""));
        assert!(html.contains("/tasks/1/edit"));
        assert!(html.contains("/tasks/1/delete"));
    }

    #[test]
    fn list_renders_thumbnail_when_present() {
        let pages = Pages::new();
        let html = pages
            .render(
                "task_list.html",
                context! {
                    tasks => vec![context! {
                        id => 2,
                        title => "With image",
                        detail => "d",
                        image_url => "https://cdn.example.co/1_a.png",
                        has_image => true,
                        is_complete => true,
                        created => "2024-03-01",
                        updated => "2024-03-02",
                    }],
                },
            )
            .unwrap();
        assert!(html.contains("https://cdn.example.co/1_a.png"));
        assert!(html.contains("Complete"));
    }

    #[test]
    fn form_prefills_and_shows_alert() {
        let pages = Pages::new();
        let html = pages
            .render(
                "task_form.html",
                context! {
                    editing => true,
                    action => "/tasks/5/edit",
                    alert => "Saving the task failed: boom",
                    title => "Old title",
                    detail => "Old detail",
                    is_complete => true,
                    image_url => "https://cdn.example.co/old.png",
                },
            )
            .unwrap();
        assert!(html.contains("Saving the task failed: boom"));
        assert!(html.contains("value=\"Old title\""));
        assert!(html.contains("Old detail"));
        assert!(html.contains("old_image_url"));
        assert!(html.contains("https://cdn.example.co/old.png"));
    }

    #[test]
    fn create_form_has_no_hidden_old_image_field() {
        let pages = Pages::new();
        let html = pages
            .render(
                "task_form.html",
                context! {
                    editing => false,
                    action => "/tasks/new",
                    alert => Option::<String>::None,
                    title => "",
                    detail => "",
                    is_complete => false,
                    image_url => "",
                },
            )
            .unwrap();
        assert!(!html.contains("old_image_url"));
        assert!(html.contains("required"));
    }
}
