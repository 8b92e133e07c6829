//! 门店主数据页面

use leptos::prelude::*;
use leptos::task::spawn_local;
use rekap_shared::Outlet;
use rekap_shared::forms::{OutletForm, REQUIRED_FIELDS_MESSAGE};

use crate::components::form_dialog::FormDialog;
use crate::components::icons::{Pencil, Plus, Store, Trash2};
use crate::config::use_config;
use crate::web::dialog::{alert, confirm};

#[component]
pub fn OutletPage() -> impl IntoView {
    let config = use_config();

    let (outlets, set_outlets) = signal(Vec::<Outlet>::new());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let open = RwSignal::new(false);
    let editing = RwSignal::new(Option::<u64>::None);
    let form = RwSignal::new(OutletForm::default());

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            match config.client().list_outlets().await {
                Ok(list) => set_outlets.set(list),
                Err(e) => log::error!("[Outlet] failed to load outlets: {}", e),
            }
            set_loading.set(false);
        });
    };
    load();

    let open_add = move |_| {
        editing.set(None);
        form.set(OutletForm::default());
        open.set(true);
    };

    let open_edit = move |outlet: &Outlet| {
        editing.set(Some(outlet.id));
        form.set(OutletForm::from_outlet(outlet));
        open.set(true);
    };

    let on_save = move |_: ()| {
        let input = match form.with_untracked(|f| f.to_input()) {
            Ok(input) => input,
            Err(e) => {
                alert(&e.user_message(REQUIRED_FIELDS_MESSAGE));
                return;
            }
        };
        let id = editing.get_untracked();

        set_saving.set(true);
        spawn_local(async move {
            let api = config.client();
            let result = match id {
                Some(id) => api.update_outlet(id, &input).await,
                None => api.create_outlet(&input).await,
            };
            match result {
                Ok(()) => {
                    open.set(false);
                    load();
                }
                Err(e) => {
                    log::error!("[Outlet] save failed: {}", e);
                    alert(&e.user_message("Gagal menyimpan data."));
                }
            }
            set_saving.set(false);
        });
    };

    let on_delete = move |id: u64| {
        if !confirm("Yakin ingin menghapus outlet ini?") {
            return;
        }
        spawn_local(async move {
            match config.client().delete_outlet(id).await {
                Ok(()) => load(),
                Err(e) => {
                    log::error!("[Outlet] delete {} failed: {}", id, e);
                    alert("Gagal menghapus data.");
                }
            }
        });
    };

    let title = Signal::derive(move || {
        if editing.get().is_some() {
            "Edit Outlet".to_string()
        } else {
            "Tambah Outlet Baru".to_string()
        }
    });

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-6 space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold flex items-center gap-2">
                    <Store attr:class="h-7 w-7 text-primary" /> "Data Outlet"
                </h2>
                <button class="btn btn-primary gap-2" on:click=open_add>
                    <Plus attr:class="h-4 w-4" /> "Tambah Outlet"
                </button>
            </div>

            <div class="card bg-base-100 shadow overflow-x-auto">
                <table class="table table-zebra">
                    <thead class="bg-primary text-primary-content">
                        <tr>
                            <th class="w-12">"No"</th>
                            <th>"Kode Outlet"</th>
                            <th>"Nama Outlet"</th>
                            <th class="text-center">"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || loading.get()>
                            <tr>
                                <td colspan="4" class="text-center">
                                    <span class="loading loading-spinner loading-md mt-2"></span>
                                </td>
                            </tr>
                        </Show>
                        <Show when=move || !loading.get() && outlets.with(|o| o.is_empty())>
                            <tr>
                                <td colspan="4" class="text-center">"Tidak ada data outlet."</td>
                            </tr>
                        </Show>
                        {move || {
                            outlets
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(idx, outlet)| {
                                    let id = outlet.id;
                                    let code = outlet.code.clone();
                                    let name = outlet.name.clone();
                                    view! {
                                        <tr>
                                            <td>{idx + 1}</td>
                                            <td class="font-mono">{code}</td>
                                            <td>{name}</td>
                                            <td class="text-center">
                                                <button class="btn btn-ghost btn-sm btn-square text-primary" on:click=move |_| open_edit(&outlet)>
                                                    <Pencil attr:class="h-4 w-4" />
                                                </button>
                                                <button class="btn btn-ghost btn-sm btn-square text-error" on:click=move |_| on_delete(id)>
                                                    <Trash2 attr:class="h-4 w-4" />
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>

            <FormDialog open=open title=title saving=saving on_save=on_save>
                <label class="form-control w-full">
                    <span class="label-text mb-1">"Kode Outlet (misal: OUT-001)"</span>
                    <input
                        type="text"
                        class="input input-bordered w-full"
                        prop:value=move || form.with(|f| f.code.clone())
                        on:input=move |ev| form.update(|f| f.code = event_target_value(&ev))
                    />
                </label>
                <label class="form-control w-full">
                    <span class="label-text mb-1">"Nama Outlet"</span>
                    <input
                        type="text"
                        class="input input-bordered w-full"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </label>
            </FormDialog>
        </div>
    }
}
