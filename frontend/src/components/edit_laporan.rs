//! 编辑已提交期间页面
//!
//! 期间由 URL 参数固定，页面始终可编辑；保存时整体覆盖该期间的数据。

use leptos::prelude::*;
use leptos::task::spawn_local;
use rekap_shared::{FormMode, MasterData, Period, ReportForm};

use crate::components::icons::{ArrowLeft, Save};
use crate::components::report::ReportBoard;
use crate::config::use_config;
use crate::web::dialog::{alert, confirm};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

const OVERWRITE_CONFIRM: &str = "Apakah Anda yakin ingin memperbarui data laporan ini? Data lama bulan ini akan ditimpa dengan data baru.";

#[component]
pub fn EditLaporanPage(period: Option<Period>) -> impl IntoView {
    let router = use_router();

    match period {
        Some(period) => view! { <EditForm period=period /> }.into_any(),
        None => view! {
            <div class="p-8 text-center space-y-4">
                <div role="alert" class="alert alert-error max-w-xl mx-auto">
                    <span>"Parameter URL tidak valid. Harap akses melalui halaman Rekap."</span>
                </div>
                <button class="btn btn-primary" on:click=move |_| router.go(AppRoute::Rekap)>
                    "Kembali ke Rekap"
                </button>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn EditForm(period: Period) -> impl IntoView {
    let config = use_config();
    let router = use_router();

    let form = RwSignal::new(ReportForm::new(FormMode::Edit(period)));
    let master = RwSignal::new(MasterData::default());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);

    spawn_local(async move {
        let api = config.client();
        match api.load_master_data().await {
            Ok(data) => master.set(data),
            Err(e) => log::error!("[EditLaporan] failed to load master data: {}", e),
        }
        match api.fetch_report(period).await {
            Ok(records) => form.update(|f| f.load(&records)),
            Err(e) => log::error!("[EditLaporan] failed to fetch report for {}: {}", period, e),
        }
        set_loading.set(false);
    });

    let on_save = move |_| {
        let rows = match form.with_untracked(|f| f.prepare_submit(period)) {
            Ok(rows) => rows,
            Err(blocked) => {
                alert(&blocked.to_string());
                return;
            }
        };
        if !confirm(OVERWRITE_CONFIRM) {
            return;
        }

        set_saving.set(true);
        spawn_local(async move {
            match config.client().overwrite_report(&rows).await {
                Ok(()) => {
                    alert("Laporan berhasil diperbarui!");
                    router.go(AppRoute::Rekap);
                }
                Err(e) => {
                    log::error!("[EditLaporan] overwrite failed: {}", e);
                    alert(&format!("Error: {}", e.user_message("Gagal update")));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="max-w-6xl mx-auto p-4 md:p-6 space-y-6">
            <button class="btn btn-ghost btn-sm gap-2" on:click=move |_| router.go(AppRoute::Rekap)>
                <ArrowLeft attr:class="h-4 w-4" /> "Kembali"
            </button>

            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">{format!("Edit Laporan: {}", period)}</h2>
                <button
                    class="btn btn-warning gap-2"
                    disabled=move || loading.get() || saving.get()
                    on:click=on_save
                >
                    {move || if saving.get() {
                        view! { <span class="loading loading-spinner loading-sm"></span> }.into_any()
                    } else {
                        view! { <Save attr:class="h-5 w-5" /> }.into_any()
                    }}
                    {move || if saving.get() { "Menyimpan..." } else { "Simpan Perubahan" }}
                </button>
            </div>

            <div class="card bg-warning/10 shadow-sm p-4 space-y-3">
                <p class="text-sm opacity-70">
                    <b>"Mode Edit:"</b> " Silakan ubah data di tabel bawah. Tahun dan Bulan terkunci."
                </p>
                <div class="flex gap-4">
                    <input class="input input-bordered input-sm w-48" disabled value=period.month_name() />
                    <input class="input input-bordered input-sm w-32" disabled value=period.year.to_string() />
                </div>
            </div>

            <ReportBoard form=form master=master loading=loading />
        </div>
    }
}
