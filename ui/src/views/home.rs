use dioxus::prelude::*;

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "page page-home",
            h1 { "Smokescope" }
            p { "Explore a youth smoking and drug-use survey without leaving the browser." }
            p {
                "The dashboard links four chart panels to one set of filters. Narrow by "
                "gender or year, pick the pair of metrics you care about, and hover any "
                "mark to trace the same age group across every panel."
            }

            ul { class: "page-home__features",
                li { "Grouped bars and a scatter plot follow your chosen metric pair." }
                li { "Heatmaps keep smoking and drug experimentation side by side per age and gender." }
                li { "The trend line doubles as a year picker; click a point to filter everything else." }
            }
            p { class: "page-home__cta",
                "Head to the Dashboard to start, or check the Data page to see exactly what loaded."
            }
        }
    }
}
