use maud::{html, Markup};

use crate::models::session::ActiveQuiz;
use crate::services::grading_service::GradingService;
use crate::views::layout;

pub fn quiz_page(quiz: &ActiveQuiz) -> Markup {
    layout(
        "Quiz",
        html! {
            h1 { "Quiz" }
            form method="post" action="/quiz" {
                @for (i, q) in quiz.questions.iter().enumerate() {
                    @let field = GradingService::field_name(i);
                    fieldset {
                        legend { (i + 1) ". " (q.question) }
                        @for (letter, option) in q.lettered_options() {
                            label {
                                input type="radio" name=(field) value=(option);
                                " " (letter) ") " (option)
                            }
                            br;
                        }
                    }
                }
                button type="submit" { "Submit answers" }
            }
        },
    )
}
