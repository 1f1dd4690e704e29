use super::{
    client::Transport,
    manager::{EditMode, ModalState, NotesManager},
    models::{Draft, Note},
};
use ammonia::{clean, clean_text};

const STYLE: &str = r#"
    body { font-family: sans-serif; padding: 1.25rem; }
    .toolbar { display: flex; justify-content: flex-end; margin-bottom: 1.25rem; }
    .grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1.25rem; }
    .card { border-radius: 0.5rem; box-shadow: 0 1px 3px #0003; padding: 1rem; }
    .card h2 { font-weight: bold; margin: 0 0 0.5rem; }
    .modal { position: fixed; inset: 0; background: #0006; display: flex; align-items: center; justify-content: center; }
    .modal section { background: white; border-radius: 0.5rem; padding: 1.5rem; min-width: 24rem; }
"#;

pub trait Component {
    /// Render the component to a HTML string. By convention, the
    /// implementation should sanitize all string properties at render-time
    fn render(&self) -> String;
}

pub struct Page<'a> {
    pub title: String,
    pub children: Box<dyn Component + 'a>,
}

impl Component for Page<'_> {
    fn render(&self) -> String {
        format!(
            r#"
            <html>
                <head>
                    <meta name="viewport" content="width=device-width, initial-scale=1.0"></meta>
                    <title>{title}</title>
                    <style>{STYLE}</style>
                </head>
                <body>
                    {body_html}
                </body>
            </html>
            "#,
            title = clean(&self.title),
            body_html = self.children.render()
        )
    }
}

/// Everything the notes manager currently exposes: the cards, plus whichever
/// dialogs are open.
pub struct NotesBoard<'a, T> {
    pub manager: &'a NotesManager<T>,
}

impl<T: Transport> Component for NotesBoard<'_, T> {
    fn render(&self) -> String {
        let cards = self
            .manager
            .notes()
            .iter()
            .map(|note| NoteCard { note }.render())
            .collect::<Vec<String>>()
            .join("");
        let modal = match (self.manager.modal(), self.manager.draft()) {
            (ModalState::Open(mode), Some(draft)) => {
                NoteModal { mode, draft }.render()
            }
            _ => "".to_string(),
        };
        let confirm = if self.manager.is_delete_open() {
            DeleteConfirm {}.render()
        } else {
            "".to_string()
        };

        format!(
            r#"
            <main>
                <div class="toolbar">
                    <button data-action="add">Add Notes</button>
                </div>
                <div class="grid">{cards}</div>
                {modal}
                {confirm}
            </main>
            "#
        )
    }
}

pub struct NoteCard<'a> {
    pub note: &'a Note,
}

impl Component for NoteCard<'_> {
    fn render(&self) -> String {
        format!(
            r#"
            <article class="card">
                <h2>{title}</h2>
                <p>{description}</p>
                <footer>
                    <button data-action="edit" data-id="{id}">Edit</button>
                    <button data-action="delete" data-id="{id}">Delete</button>
                </footer>
            </article>
            "#,
            title = clean_text(&self.note.title),
            description = clean_text(&self.note.description),
            id = clean_text(&self.note.id.to_string()),
        )
    }
}

pub struct NoteModal<'a> {
    pub mode: EditMode,
    pub draft: &'a Draft,
}

impl Component for NoteModal<'_> {
    fn render(&self) -> String {
        let heading = match self.mode {
            EditMode::Add => "Add Note",
            EditMode::Edit => "Edit Note",
        };
        format!(
            r#"
            <div class="modal">
                <section>
                    <h2>{heading}</h2>
                    <input name="title" placeholder="Title" value="{title}" />
                    <textarea name="description" placeholder="Description">{description}</textarea>
                    <footer>
                        <button data-action="save">Save</button>
                        <button data-action="close">Cancel</button>
                    </footer>
                </section>
            </div>
            "#,
            title = clean_text(&self.draft.title),
            description = clean_text(&self.draft.description),
        )
    }
}

pub struct DeleteConfirm {}

impl Component for DeleteConfirm {
    fn render(&self) -> String {
        r#"
        <div class="modal">
            <section>
                <h2>Delete Confirmation</h2>
                <p>Are you sure you want to delete this note?</p>
                <footer>
                    <button data-action="confirm-delete">Yes, Delete</button>
                    <button data-action="cancel-delete">Cancel</button>
                </footer>
            </section>
        </div>
        "#
        .to_string()
    }
}
