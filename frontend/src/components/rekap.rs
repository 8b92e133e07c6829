//! 已提交期间浏览页面

use leptos::prelude::*;
use leptos::task::spawn_local;
use rekap_shared::calendar::month_name;
use rekap_shared::{Period, group_periods};

use crate::components::icons::{History, Pencil};
use crate::config::use_config;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn RekapPage() -> impl IntoView {
    let config = use_config();

    let (groups, set_groups) = signal(Vec::<(i32, Vec<u32>)>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    spawn_local(async move {
        match config.client().list_periods().await {
            Ok(periods) => set_groups.set(group_periods(&periods)),
            Err(e) => {
                log::error!("[Rekap] failed to load periods: {}", e);
                set_error.set(Some("Gagal memuat data rekap.".to_string()));
            }
        }
        set_loading.set(false);
    });

    let current_year = Period::current().year;

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-6 space-y-4">
            <h2 class="text-3xl font-bold flex items-center gap-2">
                <History attr:class="h-8 w-8 text-primary" /> "Rekap Laporan"
            </h2>

            <Show when=move || loading.get()>
                <div class="flex justify-center mt-4">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            </Show>

            <Show when=move || error.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || !loading.get() && error.get().is_none() && groups.with(|g| g.is_empty())>
                <div role="alert" class="alert alert-info">
                    <span>"Belum ada data laporan yang tersimpan."</span>
                </div>
            </Show>

            <For
                each=move || groups.get()
                key=|(year, _)| *year
                children=move |(year, months)| {
                    view! {
                        <div class="collapse collapse-arrow bg-base-100 shadow">
                            <input type="checkbox" checked={year == current_year} />
                            <div class="collapse-title text-lg font-bold">{format!("Tahun {}", year)}</div>
                            <div class="collapse-content">
                                <ul class="menu bg-base-200 rounded-box">
                                    {months
                                        .into_iter()
                                        .filter_map(|month| Period::new(year, month))
                                        .map(|period| {
                                            view! {
                                                <li>
                                                    <Link
                                                        to=AppRoute::EditReport(Some(period)).to_path()
                                                        class="flex justify-between"
                                                    >
                                                        <span class="font-medium">
                                                            {month_name(period.month).unwrap_or("-")}
                                                        </span>
                                                        <span class="text-primary flex items-center gap-1 text-sm">
                                                            "Edit" <Pencil attr:class="h-4 w-4" />
                                                        </span>
                                                    </Link>
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
