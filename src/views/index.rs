use maud::{html, Markup};

use crate::models::question::Difficulty;
use crate::views::layout;

pub fn index_page(max_questions: usize) -> Markup {
    let difficulties = [Difficulty::Easy, Difficulty::Intermediate, Difficulty::Hard];
    layout(
        "Create a quiz",
        html! {
            h1 { "Create a quiz" }
            p { "Enter a topic or upload a PDF, DOCX or TXT file." }
            form method="post" action="/generate" enctype="multipart/form-data" {
                label for="topic" { "Topic" }
                input type="text" id="topic" name="topic" placeholder="e.g. Photosynthesis";

                label for="file" { "Or upload study material" }
                input type="file" id="file" name="file" accept=".pdf,.docx,.txt";

                label for="num_questions" { "Number of questions" }
                input type="number" id="num_questions" name="num_questions"
                    min="1" max=(max_questions) value="5" required;

                label for="difficulty" { "Difficulty" }
                select id="difficulty" name="difficulty" {
                    @for d in difficulties {
                        option value=(d.as_str()) selected[d == Difficulty::default()] { (d) }
                    }
                }

                button type="submit" { "Generate quiz" }
            }
        },
    )
}
